// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Pose Overlay
//!
//! Skeleton and body-part overlays for 2-D human pose estimates.
//!
//! A pose detector reports 17 named keypoints per person. This crate turns
//! them into drawing commands: dots for confident keypoints, limb images
//! stretched along each confident bone, torso and head images fitted to
//! confident quadrilaterals, and a bounding box. Commands go to any
//! [`DrawingSurface`]; the crate ships an SVG writer, a command recorder and
//! (with the `annotate` feature) a raster canvas backed by `image`.
//!
//! ## Quick Start (Library)
//!
//! ```
//! use pose_overlay::{CommandRecorder, OverlayConfig, OverlayRenderer, SvgSurface};
//! use pose_overlay::keypoint::keypoints_from_xyc;
//! use ndarray::Array2;
//!
//! // One person as rows of (x, y, conf) in body-part order
//! let mut data = Array2::<f32>::zeros((17, 3));
//! for (i, mut row) in data.rows_mut().into_iter().enumerate() {
//!     row[0] = 100.0 + (i % 2) as f32 * 40.0;
//!     row[1] = 20.0 + i as f32 * 15.0;
//!     row[2] = 0.9;
//! }
//! let pose = keypoints_from_xyc(data.view())?;
//!
//! let renderer = OverlayRenderer::new(OverlayConfig::new().with_min_confidence(0.3));
//! let mut commands = CommandRecorder::new();
//! renderer.draw_pose(&pose, &mut commands);
//!
//! let mut svg = SvgSurface::new("skeletonImages/");
//! commands.replay(&mut svg);
//! let doc = svg.finish(640, 480);
//! assert!(doc.contains("overlay_item"));
//! # Ok::<(), pose_overlay::OverlayError>(())
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # SVG overlay, image hrefs under skeletonImages/
//! pose-overlay render --keypoints poses.json --output overlay.svg
//!
//! # Raster overlay on top of the source frame
//! pose-overlay render -k poses.json -o frame.png --image frame.jpg --assets skeletonImages/
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`topology`] | Body parts, bones, surfaces and the pose chain |
//! | [`keypoint`] | Detector keypoints, validation and bounding boxes |
//! | [`adjacency`] | Confident bones and surfaces of one pose |
//! | [`catalog`] | Image placement data per bone and surface |
//! | [`geometry`] | Stamp scale and rotation |
//! | [`render`] | [`OverlayRenderer`] |
//! | [`diagnostics`] | Heatmap peaks and offset vectors |
//! | [`visualizer`] | Drawing surfaces |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Raster canvas, asset loading and the CLI (default) |

// Modules
pub mod adjacency;
pub mod catalog;
#[cfg(feature = "annotate")]
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod keypoint;
pub mod logging;
pub mod render;
pub mod topology;
pub mod visualizer;

// Re-export main types for convenience
pub use adjacency::{filter_bones, filter_surfaces};
pub use catalog::{Region, RenderCatalog, RenderInfo};
pub use config::OverlayConfig;
pub use error::{OverlayError, Result};
pub use keypoint::{BoundingBox, Keypoint, Position};
pub use render::OverlayRenderer;
pub use topology::{BodyPart, Bone, Surface};
pub use visualizer::{Color, CommandRecorder, DrawCommand, DrawingSurface, OrientedImage, SvgSurface};

#[cfg(feature = "annotate")]
pub use visualizer::{AssetMap, AssetStore, RasterSurface};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
