// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing surfaces for overlay output.

/// Color type.
pub mod color;

/// Surface trait, stamp transform and command recorder.
pub mod surface;

/// SVG document output.
pub mod svg;

#[cfg(feature = "annotate")]
pub mod raster;

pub use color::Color;
pub use surface::{CommandRecorder, DrawCommand, DrawingSurface, OrientedImage};
pub use svg::SvgSurface;

#[cfg(feature = "annotate")]
pub use raster::{AssetMap, AssetStore, RasterSurface, rgb_to_rgba};
