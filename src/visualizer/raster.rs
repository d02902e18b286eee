// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Raster output on an `RgbImage`, with limb and surface artwork stamped from
//! an [`AssetStore`].

use std::collections::HashMap;
use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use ndarray::ArrayView3;

use crate::error::{OverlayError, Result};
use crate::keypoint::Position;
use crate::visualizer::{Color, DrawingSurface, OrientedImage};
use crate::{verbose, warn};

/// Resolves image ids to pixel data.
pub trait AssetStore {
    fn get(&self, id: &str) -> Option<&RgbaImage>;
}

/// In-memory asset store keyed by image id.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    images: HashMap<String, RgbaImage>,
}

impl AssetMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, image: RgbaImage) {
        self.images.insert(id.into(), image);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Load every `.png` in `dir`, keyed by file name.
    ///
    /// Files that fail to decode are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Io`] if the directory cannot be read.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut assets = Self::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_png = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !is_png {
                continue;
            }
            match image::open(&path) {
                Ok(img) => assets.insert(name, img.to_rgba8()),
                Err(e) => warn!("Skipping asset {}: {e}", path.display()),
            }
        }
        verbose!("Loaded {} overlay assets from {}", assets.len(), dir.display());
        Ok(assets)
    }
}

impl AssetStore for AssetMap {
    fn get(&self, id: &str) -> Option<&RgbaImage> {
        self.images.get(id)
    }
}

/// Surface that rasterizes onto an RGB canvas.
pub struct RasterSurface<'a> {
    canvas: RgbImage,
    assets: Option<&'a dyn AssetStore>,
    outline_color: Color,
}

impl<'a> RasterSurface<'a> {
    /// Draw over `canvas`. Stamps without artwork are outlined instead.
    #[must_use]
    pub fn new(canvas: RgbImage) -> Self {
        Self {
            canvas,
            assets: None,
            outline_color: Color::WHITE,
        }
    }

    /// Blank canvas of the given size.
    #[must_use]
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbImage::new(width, height))
    }

    /// Resolve stamp artwork through `assets`.
    #[must_use]
    pub fn with_assets(mut self, assets: &'a dyn AssetStore) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Color of outlines drawn for stamps whose artwork is unavailable.
    #[must_use]
    pub const fn with_outline_color(mut self, color: Color) -> Self {
        self.outline_color = color;
        self
    }

    #[must_use]
    pub const fn image(&self) -> &RgbImage {
        &self.canvas
    }

    #[must_use]
    pub fn into_image(self) -> RgbImage {
        self.canvas
    }

    /// Encode the canvas; format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ImageError`] if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.canvas.save(path)?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn blit(&mut self, stamp: &OrientedImage, bitmap: &RgbaImage) {
        let (bw, bh) = bitmap.dimensions();
        let (ox, oy) = stamp.offset;
        let (sw, sh) = stamp.size;
        if bw == 0 || bh == 0 || sw <= 0.0 || sh <= 0.0 {
            return;
        }
        let (px_per_u, px_per_v) = (bw as f32 / sw, bh as f32 / sh);

        let corners = stamp.corners();
        let (w, h) = self.canvas.dimensions();
        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor().max(0.0);
        let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil().min(w as f32);
        let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil().min(h as f32);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        for py in min_y as u32..max_y as u32 {
            for px in min_x as u32..max_x as u32 {
                let world = Position::new(py as f32 + 0.5, px as f32 + 0.5);
                let Some((u, v)) = stamp.to_local(world) else {
                    return;
                };
                let (bx, by) = ((u - ox) * px_per_u, (v - oy) * px_per_v);
                if bx < 0.0 || by < 0.0 || bx >= bw as f32 || by >= bh as f32 {
                    continue;
                }
                let Rgba([r, g, b, a]) = *bitmap.get_pixel(bx as u32, by as u32);
                if a == 0 {
                    continue;
                }
                let alpha = f32::from(a) / 255.0;
                let dst = self.canvas.get_pixel_mut(px, py);
                for (d, s) in dst.0.iter_mut().zip([r, g, b]) {
                    *d = f32::from(s).mul_add(alpha, f32::from(*d) * (1.0 - alpha)).round() as u8;
                }
            }
        }
    }

    fn stroke_polygon(&mut self, vertices: &[Position], color: Rgb<u8>, stroke_width: f32) {
        let n = vertices.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            self.thick_line(a, b, color, stroke_width);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn thick_line(&mut self, from: Position, to: Position, color: Rgb<u8>, width: f32) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len = dx.hypot(dy);
        let passes = width.round().max(1.0) as i32;
        let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };
        for k in 0..passes {
            let shift = k as f32 - (passes - 1) as f32 / 2.0;
            draw_line_segment_mut(
                &mut self.canvas,
                (from.x + nx * shift, from.y + ny * shift),
                (to.x + nx * shift, to.y + ny * shift),
                color,
            );
        }
    }
}

impl DrawingSurface for RasterSurface<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn draw_circle(&mut self, center: Position, radius: f32, color: Color) {
        draw_filled_circle_mut(
            &mut self.canvas,
            (center.x.round() as i32, center.y.round() as i32),
            radius.round() as i32,
            color.into(),
        );
    }

    fn draw_oriented_image(&mut self, image: &OrientedImage) {
        match self.assets.and_then(|store| store.get(&image.image)) {
            Some(bitmap) => self.blit(image, bitmap),
            None => {
                let outline = self.outline_color.into();
                self.stroke_polygon(&image.corners(), outline, 1.0);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_polygon_outline(
        &mut self,
        vertices: &[Position],
        stroke: Color,
        stroke_width: f32,
        fill: Option<Color>,
    ) {
        if let Some(fill) = fill {
            let mut poly: Vec<Point<i32>> = vertices
                .iter()
                .map(|p| Point::new(p.x.round() as i32, p.y.round() as i32))
                .collect();
            poly.dedup();
            if poly.len() > 1 && poly.first() == poly.last() {
                poly.pop();
            }
            // draw_polygon_mut panics on closed or empty input
            if poly.len() >= 3 {
                draw_polygon_mut(&mut self.canvas, &poly, Rgb::from(fill));
            }
        }
        self.stroke_polygon(vertices, stroke.into(), stroke_width);
    }

    fn draw_line(&mut self, from: Position, to: Position, color: Color) {
        draw_line_segment_mut(&mut self.canvas, (from.x, from.y), (to.x, to.y), color.into());
    }
}

/// Publish an `(height, width, 3)` RGB frame buffer as an opaque RGBA image.
///
/// # Errors
///
/// Returns [`OverlayError::MalformedInput`] if the array is not 3-channel.
#[allow(clippy::cast_possible_truncation)]
pub fn rgb_to_rgba(pixels: ArrayView3<u8>) -> Result<RgbaImage> {
    let (height, width, channels) = pixels.dim();
    if channels != 3 {
        return Err(OverlayError::MalformedInput(format!(
            "expected 3 channels, got {channels}"
        )));
    }
    Ok(RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgba([pixels[[y, x, 0]], pixels[[y, x, 1]], pixels[[y, x, 2]], 255])
    }))
}

/// Load a background frame for drawing.
///
/// # Errors
///
/// Returns [`OverlayError::ImageError`] if the file cannot be decoded.
pub fn load_canvas(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}
