// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Overlay configuration.
//!
//! This module defines the [`OverlayConfig`] struct, which carries every drawing
//! style and policy knob the renderer needs: confidence threshold, colors, radii,
//! the placeholder asset and the bounding-box policy.

use crate::error::{OverlayError, Result};
use crate::visualizer::Color;

/// Image id drawn when a bone or surface has no catalog entry.
pub const DEFAULT_FALLBACK_IMAGE: &str = "missing.png";

/// Configuration for overlay rendering.
///
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use pose_overlay::{Color, OverlayConfig};
///
/// let config = OverlayConfig::new()
///     .with_min_confidence(0.3)
///     .with_point_color(Color::GREEN)
///     .with_scale(0.5);
/// ```
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Minimum keypoint score for points, bones and surfaces (0.0 to 1.0).
    pub min_confidence: f32,
    /// Fill color of keypoint dots.
    pub point_color: Color,
    /// Radius of keypoint dots in pixels.
    pub point_radius: f32,
    /// Stroke color of the pose bounding box.
    pub bounding_box_color: Color,
    /// Stroke width of the pose bounding box.
    pub bounding_box_stroke: f32,
    /// Whether the bounding box only spans confident keypoints.
    /// Off by default: the box covers every keypoint regardless of score.
    pub bounding_box_respects_confidence: bool,
    /// Image id used for unmatched bones and surfaces.
    pub fallback_image: String,
    /// Factor applied to keypoint positions before drawing.
    pub scale: f32,
    /// Radius of heatmap dots.
    pub heatmap_radius: f32,
    /// Color of heatmap dots and offset vectors.
    pub diagnostic_color: Color,
    /// Draw body surfaces as part of [`crate::OverlayRenderer::draw_pose`].
    pub draw_surfaces: bool,
    /// Draw the bounding box as part of [`crate::OverlayRenderer::draw_pose`].
    pub draw_bounding_box: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            point_color: Color::AQUA,
            point_radius: 3.0,
            bounding_box_color: Color::RED,
            bounding_box_stroke: 4.0,
            bounding_box_respects_confidence: false,
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
            scale: 1.0,
            heatmap_radius: 5.0,
            diagnostic_color: Color::AQUA,
            draw_surfaces: true,
            draw_bounding_box: true,
        }
    }
}

impl OverlayConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum keypoint confidence.
    ///
    /// Keypoints scoring below this are not drawn, and any bone or surface that
    /// touches one is skipped.
    #[must_use]
    pub fn with_min_confidence(mut self, threshold: f32) -> Self {
        self.min_confidence = threshold;
        self
    }

    /// Set the keypoint dot color.
    #[must_use]
    pub fn with_point_color(mut self, color: Color) -> Self {
        self.point_color = color;
        self
    }

    /// Set the keypoint dot radius.
    #[must_use]
    pub fn with_point_radius(mut self, radius: f32) -> Self {
        self.point_radius = radius;
        self
    }

    /// Set the bounding box stroke color.
    #[must_use]
    pub fn with_bounding_box_color(mut self, color: Color) -> Self {
        self.bounding_box_color = color;
        self
    }

    /// Choose whether the bounding box ignores low-confidence keypoints.
    #[must_use]
    pub fn with_bounding_box_respects_confidence(mut self, respect: bool) -> Self {
        self.bounding_box_respects_confidence = respect;
        self
    }

    /// Set the placeholder image id for unmatched catalog keys.
    #[must_use]
    pub fn with_fallback_image(mut self, image: impl Into<String>) -> Self {
        self.fallback_image = image.into();
        self
    }

    /// Set the factor applied to keypoint positions.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the heatmap dot radius.
    #[must_use]
    pub fn with_heatmap_radius(mut self, radius: f32) -> Self {
        self.heatmap_radius = radius;
        self
    }

    /// Set the color of heatmap dots and offset vectors.
    #[must_use]
    pub fn with_diagnostic_color(mut self, color: Color) -> Self {
        self.diagnostic_color = color;
        self
    }

    /// Enable or disable surface drawing in `draw_pose`.
    #[must_use]
    pub fn with_surfaces(mut self, enabled: bool) -> Self {
        self.draw_surfaces = enabled;
        self
    }

    /// Enable or disable the bounding box in `draw_pose`.
    #[must_use]
    pub fn with_bounding_box(mut self, enabled: bool) -> Self {
        self.draw_bounding_box = enabled;
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ConfigError`] if the threshold is outside
    /// `[0, 1]`, the scale is not positive, or a radius is negative.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(OverlayError::ConfigError(format!(
                "min_confidence {} outside [0, 1]",
                self.min_confidence
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(OverlayError::ConfigError(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if self.point_radius < 0.0 || self.heatmap_radius < 0.0 {
            return Err(OverlayError::ConfigError("radius must not be negative".into()));
        }
        if self.fallback_image.is_empty() {
            return Err(OverlayError::ConfigError("fallback_image is empty".into()));
        }
        Ok(())
    }
}
