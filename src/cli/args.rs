// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OverlayConfig;
use crate::error::Result;
use crate::visualizer::Color;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Render Options:
    --keypoints, -k <FILE>   Keypoints JSON (one array per person, or a single person)
    --output, -o <FILE>      Output file; .svg writes a document, anything else a raster
    --image <FILE>           Background image drawn under the overlay
    --width <W>              Canvas width without a background [default: 640]
    --height <H>             Canvas height without a background [default: 480]
    --min-confidence <C>     Keypoint confidence threshold [default: 0.5]
    --scale <S>              Keypoint to display scale [default: 1.0]
    --assets <DIR>           Directory of stamp images for raster output
    --no-surfaces            Skip torso and head stamps
    --no-bbox                Skip the bounding box
    --bbox-confident         Bounding box only covers confident keypoints
    --quiet                  Silence warnings

Examples:
    pose-overlay render -k poses.json -o overlay.svg
    pose-overlay render -k poses.json -o frame.png --image frame.jpg --assets skeletonImages/
    pose-overlay render -k poses.json -o out.png --width 1280 --height 720 --scale 2"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render pose overlays from a keypoints file
    Render(RenderArgs),
}

/// Arguments for the render command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderArgs {
    /// Keypoints JSON file
    #[arg(short, long)]
    pub keypoints: PathBuf,

    /// Output file (.svg or a raster format)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Background image
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Canvas width when no background image is given
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Canvas height when no background image is given
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Keypoint confidence threshold
    #[arg(long, default_value_t = 0.5)]
    pub min_confidence: f32,

    /// Multiplier from keypoint to display coordinates
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Keypoint dot color (name or #rrggbb)
    #[arg(long, default_value = "aqua")]
    pub point_color: String,

    /// Directory of stamp images for raster output
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Prefix for stamp hrefs in SVG output
    #[arg(long, default_value = "skeletonImages/")]
    pub asset_prefix: String,

    /// Skip torso and head stamps
    #[arg(long, default_value_t = false)]
    pub no_surfaces: bool,

    /// Skip the bounding box
    #[arg(long, default_value_t = false)]
    pub no_bbox: bool,

    /// Bounding box only covers keypoints above the threshold
    #[arg(long, default_value_t = false)]
    pub bbox_confident: bool,

    /// Silence warnings
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Renderer configuration described by these flags.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OverlayError::ConfigError`] for an unknown color or a
    /// value outside its valid range.
    pub fn to_config(&self) -> Result<OverlayConfig> {
        let config = OverlayConfig::new()
            .with_min_confidence(self.min_confidence)
            .with_scale(self.scale)
            .with_point_color(self.point_color.parse::<Color>()?)
            .with_surfaces(!self.no_surfaces)
            .with_bounding_box(!self.no_bbox)
            .with_bounding_box_respects_confidence(self.bbox_confident);
        config.validate()?;
        Ok(config)
    }

    /// Whether the output path asks for an SVG document.
    #[must_use]
    pub fn is_svg(&self) -> bool {
        self.output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
    }
}
