// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Diagnostic views of raw model outputs: heatmap peaks and offset vectors.
//!
//! Heatmap coordinates are grid cells `(y, x)` per body part. Multiplying by the
//! model's output stride gives image pixels; the offset tensor then refines each
//! peak to sub-stride precision.

use ndarray::{Array2, ArrayView2, ArrayView3, Axis};

use crate::error::{OverlayError, Result};
use crate::keypoint::Position;
use crate::render::OverlayRenderer;
use crate::visualizer::DrawingSurface;

/// Grid cell of the strongest activation for each part.
///
/// `scores` has shape `(height, width, parts)`. Returns `(parts, 2)` rows of
/// `(y, x)`. Ties keep the first cell in row-major order.
///
/// # Errors
///
/// Returns [`OverlayError::MalformedInput`] when the grid is empty.
pub fn heatmap_argmax(scores: ArrayView3<f32>) -> Result<Array2<f32>> {
    let (height, width, parts) = scores.dim();
    if height == 0 || width == 0 {
        return Err(OverlayError::MalformedInput(format!(
            "empty heatmap grid ({height}, {width}, {parts})"
        )));
    }

    let mut coords = Array2::<f32>::zeros((parts, 2));
    for (k, channel) in scores.axis_iter(Axis(2)).enumerate() {
        let mut best = (0, 0, f32::NEG_INFINITY);
        for ((y, x), &v) in channel.indexed_iter() {
            if v > best.2 {
                best = (y, x, v);
            }
        }
        coords[[k, 0]] = best.0 as f32;
        coords[[k, 1]] = best.1 as f32;
    }
    Ok(coords)
}

/// Image-space positions of each heatmap peak after applying its offset.
///
/// `coords` is `(parts, 2)` grid cells; `offsets` is `(height, width, 2 * parts)`
/// with the y offsets in the first half of the channels and x offsets in the
/// second.
///
/// # Errors
///
/// Returns [`OverlayError::MalformedInput`] on shape mismatch or when a cell
/// lies outside the offset grid.
pub fn offset_points(
    coords: ArrayView2<f32>,
    output_stride: u32,
    offsets: ArrayView3<f32>,
) -> Result<Vec<Position>> {
    let parts = check_coords(coords)?;
    let (height, width, channels) = offsets.dim();
    if channels != 2 * parts {
        return Err(OverlayError::MalformedInput(format!(
            "offsets have {channels} channels, expected {}",
            2 * parts
        )));
    }

    let stride = output_stride as f32;
    coords
        .rows()
        .into_iter()
        .enumerate()
        .map(|(k, cell)| {
            let (y, x) = grid_cell(cell[0], cell[1], height, width)?;
            Ok(Position::new(
                cell[0] * stride + offsets[[y, x, k]],
                cell[1] * stride + offsets[[y, x, k + parts]],
            ))
        })
        .collect()
}

fn check_coords(coords: ArrayView2<f32>) -> Result<usize> {
    let (parts, cols) = coords.dim();
    if cols != 2 {
        return Err(OverlayError::MalformedInput(format!(
            "heatmap coordinates must be (parts, 2), got ({parts}, {cols})"
        )));
    }
    Ok(parts)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grid_cell(y: f32, x: f32, height: usize, width: usize) -> Result<(usize, usize)> {
    if y < 0.0 || x < 0.0 || y >= height as f32 || x >= width as f32 {
        return Err(OverlayError::MalformedInput(format!(
            "cell ({y}, {x}) outside {height}x{width} offset grid"
        )));
    }
    Ok((y as usize, x as usize))
}

impl OverlayRenderer {
    /// A dot at every heatmap peak scaled to image space. Peaks on the zero
    /// row or column are treated as empty and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::MalformedInput`] if `coords` is not `(parts, 2)`.
    pub fn draw_heatmap_values<S: DrawingSurface + ?Sized>(
        &self,
        coords: ArrayView2<f32>,
        output_stride: u32,
        surface: &mut S,
    ) -> Result<()> {
        check_coords(coords)?;
        let config = self.config();
        let stride = output_stride as f32;
        for cell in coords.rows() {
            let (y, x) = (cell[0] * stride, cell[1] * stride);
            if x != 0.0 && y != 0.0 {
                surface.draw_circle(
                    Position::new(y, x).scaled(config.scale),
                    config.heatmap_radius,
                    config.diagnostic_color,
                );
            }
        }
        Ok(())
    }

    /// A segment from every heatmap peak to its offset-refined position.
    ///
    /// # Errors
    ///
    /// See [`offset_points`].
    pub fn draw_offset_vectors<S: DrawingSurface + ?Sized>(
        &self,
        coords: ArrayView2<f32>,
        offsets: ArrayView3<f32>,
        output_stride: u32,
        surface: &mut S,
    ) -> Result<()> {
        let targets = offset_points(coords, output_stride, offsets)?;
        let config = self.config();
        let stride = output_stride as f32;
        for (cell, target) in coords.rows().into_iter().zip(targets) {
            let from = Position::new(cell[0] * stride, cell[1] * stride);
            surface.draw_line(
                from.scaled(config.scale),
                target.scaled(config.scale),
                config.diagnostic_color,
            );
        }
        Ok(())
    }
}
