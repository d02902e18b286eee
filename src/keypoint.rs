// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Keypoint types produced by an external pose detector.
//!
//! Coordinates follow the detector's `(y, x)` convention with the origin at the
//! top-left corner. Lists are read-only to this crate and live for one frame.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::topology::{BodyPart, NUM_KEYPOINTS, part_index};
use crate::warn;

/// A 2-D point in detector (or display) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Vertical coordinate, growing downwards.
    pub y: f32,
    /// Horizontal coordinate, growing rightwards.
    pub x: f32,
}

impl Position {
    /// Create a position from `(y, x)`.
    #[must_use]
    pub const fn new(y: f32, x: f32) -> Self {
        Self { y, x }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.y + other.y) * 0.5, (self.x + other.x) * 0.5)
    }

    /// Both coordinates multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.y * factor, self.x * factor)
    }
}

/// One detected landmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Which body part this is.
    pub part: BodyPart,
    /// Detector confidence in `[0, 1]`.
    pub score: f32,
    /// Location in detector space.
    pub position: Position,
}

impl Keypoint {
    /// Create a keypoint.
    #[must_use]
    pub const fn new(part: BodyPart, score: f32, y: f32, x: f32) -> Self {
        Self {
            part,
            score,
            position: Position::new(y, x),
        }
    }

    /// Create a keypoint from a detector part name.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::UnknownPart`] when `name` is not a known part. This
    /// means the detector and the topology table disagree, so callers should not
    /// try to render the pose.
    pub fn from_named(name: &str, score: f32, y: f32, x: f32) -> Result<Self> {
        let part = BodyPart::ALL[part_index(name)?];
        Ok(Self::new(part, score, y, x))
    }

    /// Whether the score passes `min_confidence`.
    #[must_use]
    pub fn is_confident(&self, min_confidence: f32) -> bool {
        self.score >= min_confidence
    }
}

/// Find the keypoint for `part`.
///
/// Detector lists are normally in index order, so the slot at `part.index()` is
/// checked first before falling back to a scan.
#[must_use]
pub fn find_keypoint(keypoints: &[Keypoint], part: BodyPart) -> Option<&Keypoint> {
    match keypoints.get(part.index()) {
        Some(kp) if kp.part == part => Some(kp),
        _ => keypoints.iter().find(|kp| kp.part == part),
    }
}

/// Check the detector contract: one keypoint per part, finite coordinates and
/// scores in `[0, 1]`.
///
/// # Errors
///
/// Returns [`OverlayError::MalformedInput`] describing the first violation.
pub fn validate_keypoints(keypoints: &[Keypoint]) -> Result<()> {
    let seen = check_entries(keypoints)?;
    if let Some(idx) = seen.iter().position(|s| !s) {
        return Err(OverlayError::MalformedInput(format!(
            "missing keypoint {}",
            BodyPart::ALL[idx]
        )));
    }
    Ok(())
}

/// Per-entry checks. Returns which parts are present.
fn check_entries(keypoints: &[Keypoint]) -> Result<[bool; NUM_KEYPOINTS]> {
    let mut seen = [false; NUM_KEYPOINTS];
    for kp in keypoints {
        if !(0.0..=1.0).contains(&kp.score) {
            return Err(OverlayError::MalformedInput(format!(
                "{} score {} outside [0, 1]",
                kp.part, kp.score
            )));
        }
        if !kp.position.x.is_finite() || !kp.position.y.is_finite() {
            return Err(OverlayError::MalformedInput(format!(
                "{} has a non-finite position",
                kp.part
            )));
        }
        if std::mem::replace(&mut seen[kp.part.index()], true) {
            return Err(OverlayError::MalformedInput(format!(
                "{} appears more than once",
                kp.part
            )));
        }
    }
    Ok(seen)
}

/// Build a keypoint list from one pose row of a YOLO-style keypoint tensor.
///
/// `data` has shape `(17, 2)` or `(17, 3)` with columns `x, y[, conf]`, rows in
/// [`BodyPart`] order. Without a confidence column every score is `1.0`.
///
/// # Errors
///
/// Returns [`OverlayError::MalformedInput`] for any other shape.
pub fn keypoints_from_xyc(data: ArrayView2<f32>) -> Result<Vec<Keypoint>> {
    let (rows, cols) = data.dim();
    if rows != NUM_KEYPOINTS || !(2..=3).contains(&cols) {
        return Err(OverlayError::MalformedInput(format!(
            "expected keypoint array of shape ({NUM_KEYPOINTS}, 2|3), got ({rows}, {cols})"
        )));
    }
    Ok(BodyPart::ALL
        .iter()
        .zip(data.rows())
        .map(|(&part, row)| {
            let score = if cols == 3 { row[2] } else { 1.0 };
            Keypoint::new(part, score, row[1], row[0])
        })
        .collect())
}

/// Copy of `keypoints` with positions multiplied by `scale`, for drawing onto a
/// resized display.
#[must_use]
pub fn scale_keypoints(keypoints: &[Keypoint], scale: f32) -> Vec<Keypoint> {
    keypoints
        .iter()
        .map(|kp| Keypoint {
            position: kp.position.scaled(scale),
            ..*kp
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PoseFile {
    People(Vec<Vec<Keypoint>>),
    Single(Vec<Keypoint>),
}

/// Parse detector output serialized as JSON: either one keypoint array per
/// person or a single person's array.
///
/// A pose may lack some parts; the renderer then drops only the bones and
/// surfaces that need them. Each gap is logged.
///
/// # Errors
///
/// Returns [`OverlayError::ParseError`] for invalid JSON or unknown part names
/// and [`OverlayError::MalformedInput`] for a score outside `[0, 1]`, a
/// non-finite position or a repeated part.
pub fn parse_poses(json: &str) -> Result<Vec<Vec<Keypoint>>> {
    let poses = match serde_json::from_str::<PoseFile>(json)? {
        PoseFile::People(people) => people,
        PoseFile::Single(pose) => vec![pose],
    };
    for (person, pose) in poses.iter().enumerate() {
        let seen = check_entries(pose)?;
        let missing: Vec<&str> = BodyPart::ALL
            .iter()
            .zip(seen)
            .filter(|&(_, present)| !present)
            .map(|(part, _)| part.name())
            .collect();
        if !missing.is_empty() {
            warn!("pose {person} is missing {}", missing.join(", "));
        }
    }
    Ok(poses)
}

/// Axis-aligned extent of a pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Corners clockwise from the top-left.
    #[must_use]
    pub fn corners(&self) -> [Position; 4] {
        [
            Position::new(self.min_y, self.min_x),
            Position::new(self.min_y, self.max_x),
            Position::new(self.max_y, self.max_x),
            Position::new(self.max_y, self.min_x),
        ]
    }
}

/// Bounding box over `keypoints`.
///
/// With `min_confidence` set, only keypoints passing it contribute; with `None`
/// every keypoint counts regardless of score. Returns `None` when nothing
/// contributes.
#[must_use]
pub fn bounding_box(keypoints: &[Keypoint], min_confidence: Option<f32>) -> Option<BoundingBox> {
    keypoints
        .iter()
        .filter(|kp| min_confidence.is_none_or(|min| kp.is_confident(min)))
        .fold(None, |acc: Option<BoundingBox>, kp| {
            let Position { y, x } = kp.position;
            Some(match acc {
                None => BoundingBox {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => BoundingBox {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            })
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ndarray::{Array2, array};

    /// A full pose with every part at `score`, laid out on a diagonal.
    pub(crate) fn full_pose(score: f32) -> Vec<Keypoint> {
        BodyPart::ALL
            .iter()
            .map(|&p| {
                let i = p.index() as f32;
                Keypoint::new(p, score, 10.0 * i, 5.0 * i)
            })
            .collect()
    }

    #[test]
    fn test_position_math() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(4.0, 3.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert_eq!(a.midpoint(b), Position::new(2.0, 1.5));
        assert_eq!(b.scaled(2.0), Position::new(8.0, 6.0));
    }

    #[test]
    fn test_from_named() {
        let kp = Keypoint::from_named("leftWrist", 0.8, 1.0, 2.0).unwrap();
        assert_eq!(kp.part, BodyPart::LeftWrist);
        assert!(matches!(
            Keypoint::from_named("tail", 0.8, 1.0, 2.0),
            Err(OverlayError::UnknownPart(_))
        ));
    }

    #[test]
    fn test_find_keypoint_out_of_order() {
        let mut pose = full_pose(0.9);
        pose.reverse();
        let kp = find_keypoint(&pose, BodyPart::LeftHip).unwrap();
        assert_eq!(kp.part, BodyPart::LeftHip);

        pose.retain(|kp| kp.part != BodyPart::Nose);
        assert!(find_keypoint(&pose, BodyPart::Nose).is_none());
    }

    #[test]
    fn test_validate_keypoints() {
        let pose = full_pose(0.5);
        validate_keypoints(&pose).unwrap();

        let mut missing = pose.clone();
        missing.pop();
        let err = validate_keypoints(&missing).unwrap_err();
        assert!(err.to_string().contains("rightAnkle"));

        let mut bad_score = pose.clone();
        bad_score[3].score = 1.5;
        assert!(matches!(
            validate_keypoints(&bad_score),
            Err(OverlayError::MalformedInput(_))
        ));

        let mut dup = pose;
        dup[1].part = BodyPart::Nose;
        assert!(validate_keypoints(&dup).is_err());
    }

    #[test]
    fn test_keypoints_from_xyc() {
        let mut data = Array2::<f32>::zeros((17, 3));
        data.row_mut(5).assign(&array![12.0, 34.0, 0.75]);
        let kps = keypoints_from_xyc(data.view()).unwrap();
        assert_eq!(kps.len(), 17);
        assert_eq!(kps[5].part, BodyPart::LeftShoulder);
        assert!((kps[5].position.x - 12.0).abs() < 1e-6);
        assert!((kps[5].position.y - 34.0).abs() < 1e-6);
        assert!((kps[5].score - 0.75).abs() < 1e-6);

        let xy_only = Array2::<f32>::zeros((17, 2));
        let kps = keypoints_from_xyc(xy_only.view()).unwrap();
        assert!(kps.iter().all(|k| (k.score - 1.0).abs() < 1e-6));

        let wrong = Array2::<f32>::zeros((16, 3));
        assert!(keypoints_from_xyc(wrong.view()).is_err());
    }

    #[test]
    fn test_parse_poses() {
        let pose = full_pose(0.8);
        let single = serde_json::to_string(&pose).unwrap();
        assert!(single.contains("\"part\":\"leftShoulder\""));
        assert_eq!(parse_poses(&single).unwrap(), vec![pose.clone()]);

        let people = serde_json::to_string(&vec![pose.clone(), pose]).unwrap();
        assert_eq!(parse_poses(&people).unwrap().len(), 2);
        assert_eq!(parse_poses("[]").unwrap().len(), 0);

        let bad_part = r#"[{"part":"tail","score":0.5,"position":{"y":1,"x":2}}]"#;
        assert!(matches!(parse_poses(bad_part), Err(OverlayError::ParseError(_))));
        let out_of_range = r#"[{"part":"nose","score":1.5,"position":{"y":1,"x":2}}]"#;
        assert!(matches!(parse_poses(out_of_range), Err(OverlayError::MalformedInput(_))));
        let repeated = r#"[{"part":"nose","score":0.5,"position":{"y":1,"x":2}},
                           {"part":"nose","score":0.6,"position":{"y":3,"x":4}}]"#;
        assert!(matches!(parse_poses(repeated), Err(OverlayError::MalformedInput(_))));
    }

    #[test]
    fn test_parse_poses_keeps_incomplete_pose() {
        let pose: Vec<Keypoint> = full_pose(0.9)
            .into_iter()
            .filter(|kp| kp.part != BodyPart::LeftWrist)
            .collect();
        let json = serde_json::to_string(&pose).unwrap();

        let parsed = parse_poses(&json).unwrap();
        assert_eq!(parsed[0].len(), NUM_KEYPOINTS - 1);
        assert!(validate_keypoints(&parsed[0]).is_err());

        // only the forearm needs the wrist
        let bones: Vec<_> = crate::adjacency::filter_bones(&parsed[0], 0.5).collect();
        assert_eq!(bones.len(), 7);
        assert!(bones.iter().all(|(a, b)| a.part != BodyPart::LeftWrist && b.part != BodyPart::LeftWrist));
        assert_eq!(crate::adjacency::filter_surfaces(&parsed[0], 0.5).count(), 6);
    }

    #[test]
    fn test_scale_keypoints() {
        let pose = full_pose(0.9);
        let scaled = scale_keypoints(&pose, 0.5);
        assert_eq!(scaled[4].position, Position::new(20.0, 10.0));
        assert_eq!(scaled[4].part, pose[4].part);
    }

    #[test]
    fn test_bounding_box_ignores_confidence_by_default() {
        let mut pose = full_pose(0.9);
        pose[16].score = 0.0;
        let all = bounding_box(&pose, None).unwrap();
        assert!((all.max_y - 160.0).abs() < 1e-6);
        assert!((all.width() - 80.0).abs() < 1e-6);

        let confident = bounding_box(&pose, Some(0.5)).unwrap();
        assert!((confident.max_y - 150.0).abs() < 1e-6);

        assert!(bounding_box(&[], None).is_none());
        assert!(bounding_box(&pose, Some(0.95)).is_none());
    }
}
