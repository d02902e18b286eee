// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use clap::Parser;
use pose_overlay::cli::args::{Cli, Commands};
use pose_overlay::cli::render::run_render;
use pose_overlay::error;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Render(args) => {
            if let Err(e) = run_render(args) {
                error!("{e}");
                process::exit(1);
            }
        }
    }
}
