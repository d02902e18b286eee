// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Resolve the fixed bone and surface relations against one pose.
//!
//! An adjacency is kept only when every participating keypoint passes the
//! confidence threshold. A part missing from the list drops that adjacency
//! without raising; the rest of the pose still renders.

use crate::keypoint::{Keypoint, find_keypoint};
use crate::topology::{BONES, SURFACES};

/// Bones whose endpoints both score at least `min_confidence`, resolved to the
/// actual keypoints. Lazy; yields in table order.
pub fn filter_bones(
    keypoints: &[Keypoint],
    min_confidence: f32,
) -> impl Iterator<Item = (&Keypoint, &Keypoint)> {
    BONES.iter().filter_map(move |&(a, b)| {
        let a = find_keypoint(keypoints, a)?;
        let b = find_keypoint(keypoints, b)?;
        (a.is_confident(min_confidence) && b.is_confident(min_confidence)).then_some((a, b))
    })
}

/// Surfaces whose four corners all score at least `min_confidence`, resolved
/// to the actual keypoints in winding order. Lazy; yields in table order.
pub fn filter_surfaces(
    keypoints: &[Keypoint],
    min_confidence: f32,
) -> impl Iterator<Item = [&Keypoint; 4]> {
    SURFACES.iter().filter_map(move |&quad| {
        let [a, b, c, d] = quad.map(|part| find_keypoint(keypoints, part));
        let resolved = [a?, b?, c?, d?];
        resolved
            .iter()
            .all(|kp| kp.is_confident(min_confidence))
            .then_some(resolved)
    })
}
