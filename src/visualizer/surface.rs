// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing surface abstraction and the command recorder.

use crate::keypoint::Position;
use crate::visualizer::Color;

/// An image stamp placed by an affine transform.
///
/// A point `(u, v)` in the stamp's local frame lands at
/// `anchor + R(rotation_deg) · diag(scale_x, scale_y) · (u, v)`. The bitmap
/// occupies local `[x, x + width] × [y, y + height]` where `(x, y)` is
/// `offset` and `(width, height)` is `size`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedImage {
    /// Asset identifier.
    pub image: String,
    /// World position of the local origin.
    pub anchor: Position,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Clockwise rotation in degrees (y grows downwards).
    pub rotation_deg: f32,
    /// Local `(x, y)` of the bitmap's top-left corner.
    pub offset: (f32, f32),
    /// Bitmap `(width, height)` in local units.
    pub size: (f32, f32),
}

impl OrientedImage {
    /// Map a local point to world space.
    #[must_use]
    pub fn to_world(&self, u: f32, v: f32) -> Position {
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let (su, sv) = (u * self.scale_x, v * self.scale_y);
        Position::new(
            self.anchor.y + sin * su + cos * sv,
            self.anchor.x + cos * su - sin * sv,
        )
    }

    /// Map a world point back to local space. `None` when a scale is zero.
    #[must_use]
    pub fn to_local(&self, world: Position) -> Option<(f32, f32)> {
        if self.scale_x == 0.0 || self.scale_y == 0.0 {
            return None;
        }
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let dx = world.x - self.anchor.x;
        let dy = world.y - self.anchor.y;
        let su = cos * dx + sin * dy;
        let sv = -sin * dx + cos * dy;
        Some((su / self.scale_x, sv / self.scale_y))
    }

    /// World-space corners of the bitmap, starting at its top-left.
    #[must_use]
    pub fn corners(&self) -> [Position; 4] {
        let (x, y) = self.offset;
        let (w, h) = self.size;
        [
            self.to_world(x, y),
            self.to_world(x + w, y),
            self.to_world(x + w, y + h),
            self.to_world(x, y + h),
        ]
    }
}

/// Primitive operations the renderer issues. Coordinates are `(y, x)` with the
/// origin at the top-left.
pub trait DrawingSurface {
    /// Filled circle.
    fn draw_circle(&mut self, center: Position, radius: f32, color: Color);

    /// Image stamp under an affine transform.
    fn draw_oriented_image(&mut self, image: &OrientedImage);

    /// Closed polygon outline, optionally filled.
    fn draw_polygon_outline(
        &mut self,
        vertices: &[Position],
        stroke: Color,
        stroke_width: f32,
        fill: Option<Color>,
    );

    /// Straight segment.
    fn draw_line(&mut self, from: Position, to: Position, color: Color);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Position,
        radius: f32,
        color: Color,
    },
    Image(OrientedImage),
    Polygon {
        vertices: Vec<Position>,
        stroke: Color,
        stroke_width: f32,
        fill: Option<Color>,
    },
    Line {
        from: Position,
        to: Position,
        color: Color,
    },
}

/// Surface that stores commands in issue order.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Image stamps only, in issue order.
    pub fn images(&self) -> impl Iterator<Item = &OrientedImage> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Image(img) => Some(img),
            _ => None,
        })
    }

    /// Issue every recorded command against `target`.
    pub fn replay(&self, target: &mut dyn DrawingSurface) {
        for command in &self.commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => target.draw_circle(*center, *radius, *color),
                DrawCommand::Image(img) => target.draw_oriented_image(img),
                DrawCommand::Polygon {
                    vertices,
                    stroke,
                    stroke_width,
                    fill,
                } => target.draw_polygon_outline(vertices, *stroke, *stroke_width, *fill),
                DrawCommand::Line { from, to, color } => target.draw_line(*from, *to, *color),
            }
        }
    }
}

impl DrawingSurface for CommandRecorder {
    fn draw_circle(&mut self, center: Position, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_oriented_image(&mut self, image: &OrientedImage) {
        self.commands.push(DrawCommand::Image(image.clone()));
    }

    fn draw_polygon_outline(
        &mut self,
        vertices: &[Position],
        stroke: Color,
        stroke_width: f32,
        fill: Option<Color>,
    ) {
        self.commands.push(DrawCommand::Polygon {
            vertices: vertices.to_vec(),
            stroke,
            stroke_width,
            fill,
        });
    }

    fn draw_line(&mut self, from: Position, to: Position, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(rotation_deg: f32, scale_x: f32, scale_y: f32) -> OrientedImage {
        OrientedImage {
            image: "t.png".into(),
            anchor: Position::new(50.0, 100.0),
            scale_x,
            scale_y,
            rotation_deg,
            offset: (-10.0, -20.0),
            size: (20.0, 40.0),
        }
    }

    #[test]
    fn test_to_world_rotation() {
        // +90 degrees takes the local x axis onto world +y
        let img = stamp(90.0, 2.0, 1.0);
        let p = img.to_world(10.0, 0.0);
        assert!((p.y - 70.0).abs() < 1e-4);
        assert!((p.x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_to_local_inverts_to_world() {
        let img = stamp(33.0, 1.5, -0.5);
        for &(u, v) in &[(0.0, 0.0), (3.0, -7.0), (-12.5, 40.0)] {
            let (lu, lv) = img.to_local(img.to_world(u, v)).unwrap();
            assert!((lu - u).abs() < 1e-3);
            assert!((lv - v).abs() < 1e-3);
        }
        assert!(stamp(0.0, 0.0, 1.0).to_local(Position::default()).is_none());
    }

    #[test]
    fn test_corners_unrotated() {
        let c = stamp(0.0, 1.0, 1.0).corners();
        assert_eq!(c[0], Position::new(30.0, 90.0));
        assert_eq!(c[2], Position::new(70.0, 110.0));
    }

    #[test]
    fn test_recorder_replay() {
        let mut rec = CommandRecorder::new();
        rec.draw_circle(Position::new(1.0, 2.0), 3.0, Color::AQUA);
        rec.draw_oriented_image(&stamp(0.0, 1.0, 1.0));
        rec.draw_line(Position::default(), Position::new(1.0, 1.0), Color::RED);
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.images().count(), 1);

        let mut copy = CommandRecorder::new();
        rec.replay(&mut copy);
        assert_eq!(copy.commands(), rec.commands());
    }
}
