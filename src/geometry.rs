// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Stamp placement for bones and surfaces.

use crate::catalog::RenderInfo;
use crate::keypoint::Position;
use crate::visualizer::OrientedImage;

/// Scale and rotation that fit a stamp onto its keypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    /// Degrees, clockwise in a y-down frame.
    pub rotation_deg: f32,
}

impl StampTransform {
    /// Place `info`'s bitmap at `anchor` with this transform.
    #[must_use]
    pub fn stamp(&self, anchor: Position, info: &RenderInfo) -> OrientedImage {
        OrientedImage {
            image: info.image.clone(),
            anchor,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            rotation_deg: self.rotation_deg,
            offset: (info.x, info.y),
            size: (info.image_width, info.image_height),
        }
    }
}

/// Fit a limb stamp from `a` to `b`.
///
/// Limb artwork points down its local +y axis, so the segment angle is
/// corrected by -90° and then wrapped into `(-180, 180]`. Scale is uniform:
/// `|ab| / info.height`.
#[must_use]
pub fn bone_transform(a: Position, b: Position, info: &RenderInfo) -> StampTransform {
    let scale = a.distance(b) / info.height;
    let angle = normalize_degrees((b.y - a.y).atan2(b.x - a.x).to_degrees() - 90.0);
    StampTransform {
        scale_x: scale,
        scale_y: scale,
        rotation_deg: angle,
    }
}

/// Fit a region stamp to the quad `a, b, c, d`.
///
/// The stamp's x axis follows `b - a`; its y axis spans from the midpoint of
/// `c, d` to the midpoint of `a, b`. When that second axis lies on the
/// positive side of the first, `scale_y` is negated so the bitmap flips
/// instead of rotating the wrong way.
#[must_use]
pub fn surface_transform(
    a: Position,
    b: Position,
    c: Position,
    d: Position,
    info: &RenderInfo,
) -> StampTransform {
    let (left_x, left_y) = (b.x - a.x, b.y - a.y);
    let top = a.midpoint(b);
    let bottom = c.midpoint(d);
    let (down_x, down_y) = (top.x - bottom.x, top.y - bottom.y);

    let scale_x = left_x.hypot(left_y) / info.width;
    let mut scale_y = down_x.hypot(down_y) / info.height;
    if left_x * down_y - left_y * down_x > 0.0 {
        scale_y = -scale_y;
    }

    StampTransform {
        scale_x,
        scale_y,
        rotation_deg: left_y.atan2(left_x).to_degrees(),
    }
}

/// Map an angle into `(-180, 180]`.
#[must_use]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    if a > 180.0 { a - 360.0 } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Region;

    fn info(width: f32, height: f32) -> RenderInfo {
        RenderInfo {
            image: "t.png".into(),
            x: -5.0,
            y: -7.0,
            width,
            height,
            image_width: 20.0,
            image_height: 30.0,
            strength: 1.0,
            region: Region::Head,
        }
    }

    #[test]
    fn test_bone_straight_down() {
        // (10,10) -> (40,10): 30px straight down, image already points down
        let t = bone_transform(Position::new(10.0, 10.0), Position::new(40.0, 10.0), &info(200.0, 400.0));
        assert!((t.scale_x - 30.0 / 400.0).abs() < 1e-6);
        assert!((t.scale_x - t.scale_y).abs() < 1e-9);
        assert!(t.rotation_deg.abs() < 1e-4);
    }

    #[test]
    fn test_bone_reverse_differs_by_half_turn() {
        let a = Position::new(12.0, -3.0);
        let b = Position::new(-20.0, 41.0);
        let info = info(200.0, 400.0);
        let fwd = bone_transform(a, b, &info);
        let rev = bone_transform(b, a, &info);
        assert!((fwd.scale_x - rev.scale_x).abs() < 1e-6);
        let diff = normalize_degrees(fwd.rotation_deg - rev.rotation_deg);
        assert!((diff.abs() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_bone_rotation_stays_in_half_turn() {
        // up and to the left: raw angle is -225°
        let t = bone_transform(Position::new(0.0, 0.0), Position::new(-10.0, -10.0), &info(200.0, 400.0));
        assert!((t.rotation_deg - 135.0).abs() < 1e-4);

        let up = bone_transform(Position::new(10.0, 0.0), Position::new(0.0, 0.0), &info(200.0, 400.0));
        assert!((up.rotation_deg.abs() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_surface_axes() {
        // A, B along +x; C, D below
        let t = surface_transform(
            Position::new(0.0, 0.0),
            Position::new(0.0, 10.0),
            Position::new(20.0, 10.0),
            Position::new(20.0, 0.0),
            &info(5.0, 4.0),
        );
        assert!((t.scale_x - 2.0).abs() < 1e-6);
        assert!((t.scale_y - 5.0).abs() < 1e-6);
        assert!(t.rotation_deg.abs() < 1e-6);
    }

    #[test]
    fn test_surface_mirror_flips_only_scale_y() {
        let info = info(5.0, 4.0);
        let (a, b) = (Position::new(3.0, 1.0), Position::new(9.0, 13.0));
        let (c, d) = (Position::new(30.0, 4.0), Position::new(26.0, -6.0));
        let normal = surface_transform(a, b, c, d, &info);

        // Reflect C and D across the line through A and B
        let reflect = |p: Position| {
            let (lx, ly) = (b.x - a.x, b.y - a.y);
            let len2 = lx * lx + ly * ly;
            let t = ((p.x - a.x) * lx + (p.y - a.y) * ly) / len2;
            let (fx, fy) = (a.x + t * lx, a.y + t * ly);
            Position::new(2.0 * fy - p.y, 2.0 * fx - p.x)
        };
        let mirrored = surface_transform(a, b, reflect(c), reflect(d), &info);

        assert!((normal.scale_x - mirrored.scale_x).abs() < 1e-4);
        assert!((normal.scale_y + mirrored.scale_y).abs() < 1e-4);
        assert!((normal.rotation_deg - mirrored.rotation_deg).abs() < 1e-4);
        assert!(normal.scale_y.abs() > 0.0);
    }

    #[test]
    fn test_surface_swap_ab_turns_and_flips() {
        let info = info(5.0, 4.0);
        let (a, b) = (Position::new(0.0, 0.0), Position::new(0.0, 10.0));
        let (c, d) = (Position::new(20.0, 10.0), Position::new(20.0, 0.0));
        let normal = surface_transform(a, b, c, d, &info);
        let swapped = surface_transform(b, a, c, d, &info);
        assert!((normal.scale_x - swapped.scale_x).abs() < 1e-6);
        assert!((normal.scale_y + swapped.scale_y).abs() < 1e-6);
        let diff = normalize_degrees(normal.rotation_deg - swapped.rotation_deg);
        assert!((diff.abs() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_stamp_carries_info() {
        let t = StampTransform {
            scale_x: 1.0,
            scale_y: 2.0,
            rotation_deg: 45.0,
        };
        let img = t.stamp(Position::new(1.0, 2.0), &info(1.0, 1.0));
        assert_eq!(img.offset, (-5.0, -7.0));
        assert_eq!(img.size, (20.0, 30.0));
        assert_eq!(img.image, "t.png");
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(270.0) + 90.0).abs() < 1e-6);
        assert!((normalize_degrees(-180.0) - 180.0).abs() < 1e-6);
        assert!((normalize_degrees(45.0) - 45.0).abs() < 1e-6);
    }
}
