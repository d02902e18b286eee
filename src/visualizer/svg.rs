// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! SVG output. Every element carries the `overlay_item` class so a host page
//! can clear the overlay between frames.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::keypoint::Position;
use crate::visualizer::{Color, DrawingSurface, OrientedImage};

/// Surface that collects SVG elements.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    asset_prefix: String,
    background: Option<String>,
    elements: Vec<String>,
}

impl SvgSurface {
    /// Surface whose image hrefs are `asset_prefix` + image id.
    #[must_use]
    pub fn new(asset_prefix: impl Into<String>) -> Self {
        Self {
            asset_prefix: asset_prefix.into(),
            ..Self::default()
        }
    }

    /// Draw `href` underneath the overlay.
    #[must_use]
    pub fn with_background(mut self, href: impl Into<String>) -> Self {
        self.background = Some(href.into());
        self
    }

    /// Elements emitted so far, one per draw call.
    #[must_use]
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Wrap the elements in an `<svg>` document of the given size.
    #[must_use]
    pub fn finish(&self, width: u32, height: u32) -> String {
        let mut doc = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
             width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        );
        if let Some(href) = &self.background {
            let _ = writeln!(
                doc,
                "  <image x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" xlink:href=\"{}\"/>",
                escape(href)
            );
        }
        for element in &self.elements {
            let _ = writeln!(doc, "  {element}");
        }
        doc.push_str("</svg>\n");
        doc
    }

    /// Write the finished document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OverlayError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        std::fs::write(path, self.finish(width, height))?;
        Ok(())
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn points(vertices: &[Position]) -> String {
    vertices
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl DrawingSurface for SvgSurface {
    fn draw_circle(&mut self, center: Position, radius: f32, color: Color) {
        self.elements.push(format!(
            "<circle class=\"overlay_item\" cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{color}\"/>",
            center.x, center.y
        ));
    }

    fn draw_oriented_image(&mut self, image: &OrientedImage) {
        let (x, y) = image.offset;
        let (w, h) = image.size;
        self.elements.push(format!(
            "<image class=\"overlay_item\" x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" \
             xlink:href=\"{}\" transform=\"translate({} {}) rotate({}) scale({} {})\"/>",
            escape(&format!("{}{}", self.asset_prefix, image.image)),
            image.anchor.x,
            image.anchor.y,
            image.rotation_deg,
            image.scale_x,
            image.scale_y,
        ));
    }

    fn draw_polygon_outline(
        &mut self,
        vertices: &[Position],
        stroke: Color,
        stroke_width: f32,
        fill: Option<Color>,
    ) {
        let fill = fill.map_or_else(|| "transparent".to_string(), Color::to_hex);
        self.elements.push(format!(
            "<polygon class=\"overlay_item\" points=\"{}\" stroke=\"{stroke}\" \
             stroke-width=\"{stroke_width}\" fill=\"{fill}\"/>",
            points(vertices)
        ));
    }

    fn draw_line(&mut self, from: Position, to: Position, color: Color) {
        self.elements.push(format!(
            "<line class=\"overlay_item\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" \
             stroke=\"{color}\" stroke-width=\"2\"/>",
            from.x, from.y, to.x, to.y
        ));
    }
}
