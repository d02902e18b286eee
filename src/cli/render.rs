// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::Path;
use std::time::Instant;

use crate::cli::args::RenderArgs;
use crate::error::Result;
use crate::keypoint::{Keypoint, parse_poses};
use crate::logging::{set_verbose, set_warnings};
use crate::render::OverlayRenderer;
use crate::visualizer::raster::load_canvas;
use crate::visualizer::{AssetMap, CommandRecorder, RasterSurface, SvgSurface};
use crate::{section, success, verbose};

/// Run the `render` command: read poses, draw them and write the output file.
///
/// # Errors
///
/// Returns the first error from reading the keypoints, validating the
/// configuration, loading images or writing the output.
pub fn run_render(args: &RenderArgs) -> Result<()> {
    set_verbose(args.verbose);
    set_warnings(!args.quiet);

    let start = Instant::now();
    let config = args.to_config()?;
    let poses = load_poses(&args.keypoints)?;

    section!("pose-overlay {}", crate::VERSION);
    verbose!(
        "{} pose(s) from {}, min confidence {}",
        poses.len(),
        args.keypoints.display(),
        config.min_confidence
    );

    let renderer = OverlayRenderer::new(config);
    let mut commands = CommandRecorder::new();
    renderer.draw_poses(&poses, &mut commands);
    verbose!(
        "{} draw commands, {} image stamps",
        commands.len(),
        commands.images().count()
    );

    if args.is_svg() {
        write_svg(args, &commands)?;
    } else {
        write_raster(args, &commands)?;
    }

    verbose!("Render: {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
    success!("Saved {}", args.output.display());
    Ok(())
}

/// Read and validate a keypoints JSON file.
///
/// # Errors
///
/// See [`parse_poses`]; also returns [`crate::OverlayError::Io`] when the file
/// cannot be read.
pub fn load_poses(path: &Path) -> Result<Vec<Vec<Keypoint>>> {
    let json = std::fs::read_to_string(path)?;
    parse_poses(&json)
}

fn write_svg(args: &RenderArgs, commands: &CommandRecorder) -> Result<()> {
    let mut svg = SvgSurface::new(args.asset_prefix.as_str());
    let (width, height) = match &args.image {
        Some(path) => {
            svg = svg.with_background(path.to_string_lossy());
            image::image_dimensions(path)?
        }
        None => (args.width, args.height),
    };
    commands.replay(&mut svg);
    svg.save(&args.output, width, height)
}

fn write_raster(args: &RenderArgs, commands: &CommandRecorder) -> Result<()> {
    let canvas = match &args.image {
        Some(path) => load_canvas(path)?,
        None => image::RgbImage::new(args.width, args.height),
    };
    let assets = args.assets.as_deref().map(AssetMap::load_dir).transpose()?;

    let mut surface = RasterSurface::new(canvas);
    if let Some(assets) = &assets {
        surface = surface.with_assets(assets);
    }
    commands.replay(&mut surface);
    surface.save(&args.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Commands};
    use crate::keypoint::tests::full_pose;
    use clap::Parser;

    fn render_args(dir: &Path, output: &str) -> RenderArgs {
        let keypoints = dir.join("poses.json");
        std::fs::write(&keypoints, serde_json::to_string(&full_pose(0.9)).unwrap()).unwrap();
        let Commands::Render(args) = Cli::parse_from([
            "app".to_string(),
            "render".to_string(),
            "-k".to_string(),
            keypoints.to_string_lossy().into_owned(),
            "-o".to_string(),
            dir.join(output).to_string_lossy().into_owned(),
            "--width".to_string(),
            "120".to_string(),
            "--height".to_string(),
            "200".to_string(),
            "--quiet".to_string(),
            "--verbose".to_string(),
            "false".to_string(),
        ])
        .command;
        args
    }

    #[test]
    fn test_render_svg() {
        let dir = tempfile::tempdir().unwrap();
        let args = render_args(dir.path(), "out.svg");
        run_render(&args).unwrap();

        let doc = std::fs::read_to_string(&args.output).unwrap();
        assert!(doc.contains("width=\"120\" height=\"200\""));
        assert!(doc.contains("skeletonImages/leftShin.png"));
        assert!(doc.contains("<polygon"));
    }

    #[test]
    fn test_render_png_without_assets() {
        let dir = tempfile::tempdir().unwrap();
        let args = render_args(dir.path(), "out.png");
        run_render(&args).unwrap();

        let img = image::open(&args.output).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (120, 200));
        assert!(img.pixels().any(|p| p.0 != [0, 0, 0]));
    }

    #[test]
    fn test_render_pose_with_missing_part() {
        let dir = tempfile::tempdir().unwrap();
        let args = render_args(dir.path(), "out.svg");
        let pose: Vec<Keypoint> = full_pose(0.9)
            .into_iter()
            .filter(|kp| kp.part != crate::BodyPart::LeftWrist)
            .collect();
        std::fs::write(&args.keypoints, serde_json::to_string(&pose).unwrap()).unwrap();
        run_render(&args).unwrap();

        let doc = std::fs::read_to_string(&args.output).unwrap();
        assert!(!doc.contains("leftForearm.png"));
        assert!(doc.contains("leftBicep.png"));
        assert_eq!(doc.matches("<circle").count(), 16);
    }

    #[test]
    fn test_missing_keypoints_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = render_args(dir.path(), "out.svg");
        args.keypoints = dir.path().join("absent.json");
        assert!(matches!(run_render(&args), Err(crate::OverlayError::Io(_))));
        assert!(!args.output.exists());
    }
}
