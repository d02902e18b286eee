// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Body-part vocabulary and the fixed relations between parts.
//!
//! Three relation tables are defined here:
//!
//! - [`BONES`]: anatomically adjacent pairs, drawn as limb stamps.
//! - [`SURFACES`]: quads spanning a body region (torso and head variants).
//! - [`POSE_CHAIN`]: a parent→child tree rooted at the nose. The renderer does not
//!   use it; displacement-based decoders walk it in both directions, so the root
//!   choice is arbitrary.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};

/// Number of keypoints per pose.
pub const NUM_KEYPOINTS: usize = 17;

/// One of the 17 body parts a pose detector reports, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(usize)]
pub enum BodyPart {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl BodyPart {
    /// All parts, ordered by index.
    pub const ALL: [Self; NUM_KEYPOINTS] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Array offset of this part in a keypoint list.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Part at the given index, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name used by the detector output (`leftShoulder`, `nose`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyPart {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        part_index(s).map(|i| Self::ALL[i])
    }
}

/// Bone pair: two adjacent parts joined by a limb.
pub type Bone = (BodyPart, BodyPart);

/// Surface quad, in winding order A, B, C, D.
pub type Surface = [BodyPart; 4];

/// Limb segments drawn as oriented image stamps.
pub const BONES: [Bone; 8] = [
    (BodyPart::LeftShoulder, BodyPart::LeftElbow),
    (BodyPart::LeftElbow, BodyPart::LeftWrist),
    (BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::RightShoulder, BodyPart::RightElbow),
    (BodyPart::RightElbow, BodyPart::RightWrist),
    (BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::RightKnee, BodyPart::RightAnkle),
];

/// Body regions. The first quad is the torso; the rest are head variants that
/// differ in which face landmarks span the top edge.
pub const SURFACES: [Surface; 6] = [
    [
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::RightHip,
        BodyPart::LeftHip,
    ],
    [
        BodyPart::LeftEar,
        BodyPart::LeftEye,
        BodyPart::RightShoulder,
        BodyPart::LeftShoulder,
    ],
    [
        BodyPart::RightEye,
        BodyPart::RightEar,
        BodyPart::RightShoulder,
        BodyPart::LeftShoulder,
    ],
    [
        BodyPart::LeftEar,
        BodyPart::RightEye,
        BodyPart::RightShoulder,
        BodyPart::LeftShoulder,
    ],
    [
        BodyPart::LeftEye,
        BodyPart::RightEar,
        BodyPart::RightShoulder,
        BodyPart::LeftShoulder,
    ],
    [
        BodyPart::LeftEye,
        BodyPart::RightEye,
        BodyPart::RightShoulder,
        BodyPart::LeftShoulder,
    ],
];

/// Parent→child edges of the pose tree, rooted at the nose.
pub const POSE_CHAIN: [Bone; 16] = [
    (BodyPart::Nose, BodyPart::LeftEye),
    (BodyPart::LeftEye, BodyPart::LeftEar),
    (BodyPart::Nose, BodyPart::RightEye),
    (BodyPart::RightEye, BodyPart::RightEar),
    (BodyPart::Nose, BodyPart::LeftShoulder),
    (BodyPart::LeftShoulder, BodyPart::LeftElbow),
    (BodyPart::LeftElbow, BodyPart::LeftWrist),
    (BodyPart::LeftShoulder, BodyPart::LeftHip),
    (BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::Nose, BodyPart::RightShoulder),
    (BodyPart::RightShoulder, BodyPart::RightElbow),
    (BodyPart::RightElbow, BodyPart::RightWrist),
    (BodyPart::RightShoulder, BodyPart::RightHip),
    (BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::RightKnee, BodyPart::RightAnkle),
];

/// Body-part segmentation channels, in model output order.
pub const PART_CHANNELS: [&str; 24] = [
    "left_face",
    "right_face",
    "right_upper_leg_front",
    "right_lower_leg_back",
    "right_upper_leg_back",
    "left_lower_leg_front",
    "left_upper_leg_front",
    "left_upper_leg_back",
    "left_lower_leg_back",
    "right_feet",
    "right_lower_leg_front",
    "left_feet",
    "torso_front",
    "torso_back",
    "right_upper_arm_front",
    "right_upper_arm_back",
    "right_lower_arm_back",
    "left_lower_arm_front",
    "left_upper_arm_front",
    "left_upper_arm_back",
    "left_lower_arm_back",
    "right_hand",
    "right_lower_arm_front",
    "left_hand",
];

/// Process-wide lookup structures derived from the constant tables.
struct Topology {
    part_ids: HashMap<&'static str, usize>,
}

static TOPOLOGY: LazyLock<Topology> = LazyLock::new(|| {
    // POSE_CHAIN is a compile-time constant; a failure here is a table edit bug.
    if let Err(e) = verify_tree(&POSE_CHAIN, BodyPart::Nose) {
        panic!("pose chain table is corrupt: {e}");
    }
    let part_ids = BodyPart::ALL
        .iter()
        .map(|part| (part.name(), part.index()))
        .collect();
    Topology { part_ids }
});

/// Resolve a detector part name to its index.
///
/// # Errors
///
/// Returns [`OverlayError::UnknownPart`] if `name` is not one of the 17 parts.
pub fn part_index(name: &str) -> Result<usize> {
    TOPOLOGY
        .part_ids
        .get(name)
        .copied()
        .ok_or_else(|| OverlayError::UnknownPart(name.to_string()))
}

/// Adjacent keypoint pairs drawn as limbs.
#[must_use]
pub fn adjacent_bone_pairs() -> &'static [Bone] {
    &BONES
}

/// Adjacent keypoint quads drawn as body surfaces.
#[must_use]
pub fn adjacent_surface_quads() -> &'static [Surface] {
    &SURFACES
}

/// Parent→child edges of the pose tree. The tree shape is verified the first
/// time any topology lookup runs.
#[must_use]
pub fn skeleton_chain() -> &'static [Bone] {
    LazyLock::force(&TOPOLOGY);
    &POSE_CHAIN
}

/// All segmentation channel names.
#[must_use]
pub fn part_channels() -> &'static [&'static str] {
    &PART_CHANNELS
}

/// Segmentation channel name for a channel id.
#[must_use]
pub fn part_channel_name(id: usize) -> Option<&'static str> {
    PART_CHANNELS.get(id).copied()
}

/// Check that `edges` form a tree over all body parts rooted at `root`:
/// no part has two parents, the root has none, and every part is reachable.
///
/// # Errors
///
/// Returns [`OverlayError::InvalidTopology`] describing the first violation.
pub fn verify_tree(edges: &[Bone], root: BodyPart) -> Result<()> {
    let mut parent: HashMap<BodyPart, BodyPart> = HashMap::with_capacity(edges.len());
    for &(from, to) in edges {
        if to == root {
            return Err(OverlayError::InvalidTopology(format!(
                "root {root} has parent {from}"
            )));
        }
        if let Some(existing) = parent.insert(to, from) {
            return Err(OverlayError::InvalidTopology(format!(
                "{to} has two parents: {existing} and {from}"
            )));
        }
    }

    let mut reached = HashSet::from([root]);
    let mut frontier = vec![root];
    while let Some(node) = frontier.pop() {
        for &(from, to) in edges {
            if from == node && reached.insert(to) {
                frontier.push(to);
            }
        }
    }

    if let Some(missing) = BodyPart::ALL.iter().find(|p| !reached.contains(p)) {
        return Err(OverlayError::InvalidTopology(format!(
            "{missing} is not reachable from {root}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_index_bijection() {
        let mut seen = HashSet::new();
        for part in BodyPart::ALL {
            let idx = part_index(part.name()).unwrap();
            assert!(idx < NUM_KEYPOINTS);
            assert_eq!(BodyPart::from_index(idx), Some(part));
            assert!(seen.insert(idx));
        }
        assert_eq!(seen.len(), NUM_KEYPOINTS);
    }

    #[test]
    fn test_part_index_unknown() {
        let err = part_index("leftToe").unwrap_err();
        assert!(matches!(err, OverlayError::UnknownPart(ref n) if n == "leftToe"));
        assert!("Nose".parse::<BodyPart>().is_err());
        assert_eq!("rightAnkle".parse::<BodyPart>().unwrap(), BodyPart::RightAnkle);
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(BodyPart::from_index(0), Some(BodyPart::Nose));
        assert_eq!(BodyPart::from_index(17), None);
    }

    #[test]
    fn test_skeleton_chain_is_tree() {
        let chain = skeleton_chain();
        assert_eq!(chain.len(), NUM_KEYPOINTS - 1);
        verify_tree(chain, BodyPart::Nose).unwrap();

        let children: HashSet<_> = chain.iter().map(|&(_, c)| c).collect();
        assert_eq!(children.len(), NUM_KEYPOINTS - 1);
        assert!(!children.contains(&BodyPart::Nose));
    }

    #[test]
    fn test_verify_tree_rejects_cycle_and_second_parent() {
        let mut edges = POSE_CHAIN.to_vec();
        edges.push((BodyPart::LeftAnkle, BodyPart::LeftEye));
        assert!(matches!(
            verify_tree(&edges, BodyPart::Nose),
            Err(OverlayError::InvalidTopology(_))
        ));

        let mut edges = POSE_CHAIN.to_vec();
        edges.push((BodyPart::LeftEar, BodyPart::Nose));
        assert!(verify_tree(&edges, BodyPart::Nose).is_err());
    }

    #[test]
    fn test_verify_tree_rejects_unreachable() {
        let edges: Vec<Bone> = POSE_CHAIN
            .iter()
            .copied()
            .filter(|&(_, c)| c != BodyPart::RightHip)
            .collect();
        let err = verify_tree(&edges, BodyPart::Nose).unwrap_err();
        assert!(err.to_string().contains("rightHip"));
    }

    #[test]
    fn test_relation_tables() {
        assert_eq!(adjacent_bone_pairs().len(), 8);
        assert_eq!(adjacent_surface_quads().len(), 6);
        assert_eq!(
            adjacent_bone_pairs()[0],
            (BodyPart::LeftShoulder, BodyPart::LeftElbow)
        );
    }

    #[test]
    fn test_part_channels() {
        assert_eq!(part_channels().len(), 24);
        assert_eq!(part_channel_name(12), Some("torso_front"));
        assert_eq!(part_channel_name(24), None);
    }

    #[test]
    fn test_serde_names() {
        let part: BodyPart = serde_json::from_str("\"leftShoulder\"").unwrap();
        assert_eq!(part, BodyPart::LeftShoulder);
        assert_eq!(serde_json::to_string(&BodyPart::Nose).unwrap(), "\"nose\"");
    }
}
