// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Overlay renderer: keypoints in, drawing commands out.
//!
//! The renderer keeps no state between calls. One instance can serve every
//! person in a frame, and every frame after that.

use std::borrow::Cow;

use crate::adjacency::{filter_bones, filter_surfaces};
use crate::catalog::{Region, RenderCatalog, RenderInfo, RenderLookup, key_name};
use crate::config::OverlayConfig;
use crate::geometry::{bone_transform, surface_transform};
use crate::keypoint::{Keypoint, bounding_box, scale_keypoints};
use crate::topology::{SURFACES, Surface};
use crate::visualizer::{DrawingSurface, OrientedImage};
use crate::warn;

/// Draws poses onto a [`DrawingSurface`].
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    config: OverlayConfig,
    catalog: RenderCatalog,
    bone_placeholder: RenderInfo,
    surface_placeholder: RenderInfo,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl OverlayRenderer {
    /// Renderer using the bundled artwork catalog.
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        Self::with_catalog(config, RenderCatalog::standard())
    }

    /// Renderer using a custom catalog.
    #[must_use]
    pub fn with_catalog(config: OverlayConfig, catalog: RenderCatalog) -> Self {
        let bone_placeholder = RenderInfo::bone_placeholder(config.fallback_image.as_str());
        let surface_placeholder = RenderInfo::surface_placeholder(config.fallback_image.as_str());
        Self {
            config,
            catalog,
            bone_placeholder,
            surface_placeholder,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &RenderCatalog {
        &self.catalog
    }

    /// Keypoints in display space.
    fn display_space<'k>(&self, keypoints: &'k [Keypoint]) -> Cow<'k, [Keypoint]> {
        if (self.config.scale - 1.0).abs() < f32::EPSILON {
            Cow::Borrowed(keypoints)
        } else {
            Cow::Owned(scale_keypoints(keypoints, self.config.scale))
        }
    }

    /// A dot for every keypoint passing the confidence threshold.
    pub fn draw_keypoints<S: DrawingSurface + ?Sized>(&self, keypoints: &[Keypoint], surface: &mut S) {
        let keypoints = self.display_space(keypoints);
        for kp in keypoints
            .iter()
            .filter(|kp| kp.is_confident(self.config.min_confidence))
        {
            surface.draw_circle(kp.position, self.config.point_radius, self.config.point_color);
        }
    }

    /// Limb stamps for every confident bone.
    pub fn draw_skeleton<S: DrawingSurface + ?Sized>(&self, keypoints: &[Keypoint], surface: &mut S) {
        for stamp in self.bone_stamps(keypoints) {
            surface.draw_oriented_image(&stamp);
        }
    }

    /// Limb stamps anchored at each bone's first keypoint, in table order.
    #[must_use]
    pub fn bone_stamps(&self, keypoints: &[Keypoint]) -> Vec<OrientedImage> {
        let keypoints = self.display_space(keypoints);
        filter_bones(&keypoints, self.config.min_confidence)
            .map(|(a, b)| {
                let lookup = self.catalog.bone((a.part, b.part));
                if let RenderLookup::Unresolved((p, q)) = lookup {
                    warn!("missed adjacency name = {}", key_name(&[p, q]));
                }
                let info = lookup.info_or(&self.bone_placeholder);
                bone_transform(a.position, b.position, info).stamp(a.position, info)
            })
            .collect()
    }

    /// Region stamps for the confident surfaces of one pose.
    pub fn draw_surfaces<S: DrawingSurface + ?Sized>(&self, keypoints: &[Keypoint], surface: &mut S) {
        for stamp in self.surface_stamps(keypoints) {
            surface.draw_oriented_image(&stamp);
        }
    }

    /// Region stamps for one pose, after selection.
    ///
    /// At most one torso and one head are drawn. The first torso match is
    /// kept; among head matches the one with the largest `|ab| · strength`
    /// survives, ties keeping the earlier one. An unmatched quad competes in
    /// the role its table slot implies with a placeholder of strength 0, so it
    /// only shows when nothing with artwork matched. Output order is torso,
    /// then head.
    #[must_use]
    pub fn surface_stamps(&self, keypoints: &[Keypoint]) -> Vec<OrientedImage> {
        let keypoints = self.display_space(keypoints);
        let mut torso: Option<OrientedImage> = None;
        let mut head: Option<(f32, OrientedImage)> = None;

        for quad in filter_surfaces(&keypoints, self.config.min_confidence) {
            let parts = quad.map(|kp| kp.part);
            let lookup = self.catalog.surface(parts);
            if let RenderLookup::Unresolved(key) = lookup {
                warn!("missed surface name = {}", key_name(&key));
            }
            let info = lookup.info_or(&self.surface_placeholder);
            let [a, b, c, d] = quad.map(|kp| kp.position);
            let stamp = surface_transform(a, b, c, d, info).stamp(a, info);

            match surface_role(parts, info) {
                Region::Torso => {
                    torso.get_or_insert(stamp);
                }
                _ => {
                    let score = a.distance(b) * info.strength;
                    if head.as_ref().is_none_or(|(best, _)| score > *best) {
                        head = Some((score, stamp));
                    }
                }
            }
        }

        torso
            .into_iter()
            .chain(head.map(|(_, stamp)| stamp))
            .collect()
    }

    /// Outline of the pose extent.
    ///
    /// Covers every keypoint unless `bounding_box_respects_confidence` is set.
    pub fn draw_bounding_box<S: DrawingSurface + ?Sized>(&self, keypoints: &[Keypoint], surface: &mut S) {
        let keypoints = self.display_space(keypoints);
        let min_confidence = self
            .config
            .bounding_box_respects_confidence
            .then_some(self.config.min_confidence);
        if let Some(bbox) = bounding_box(&keypoints, min_confidence) {
            surface.draw_polygon_outline(
                &bbox.corners(),
                self.config.bounding_box_color,
                self.config.bounding_box_stroke,
                None,
            );
        }
    }

    /// Surfaces, limbs, keypoints and bounding box for one pose, back to front.
    pub fn draw_pose<S: DrawingSurface + ?Sized>(&self, keypoints: &[Keypoint], surface: &mut S) {
        if self.config.draw_surfaces {
            self.draw_surfaces(keypoints, surface);
        }
        self.draw_skeleton(keypoints, surface);
        self.draw_keypoints(keypoints, surface);
        if self.config.draw_bounding_box {
            self.draw_bounding_box(keypoints, surface);
        }
    }

    /// [`Self::draw_pose`] for every detected person.
    pub fn draw_poses<S, P>(&self, poses: &[P], surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
        P: AsRef<[Keypoint]>,
    {
        for pose in poses {
            self.draw_pose(pose.as_ref(), surface);
        }
    }
}

/// Torso or head. Entries without a region of their own take it from the
/// table slot: the first surface is the torso, the rest are head variants.
fn surface_role(parts: Surface, info: &RenderInfo) -> Region {
    match info.region {
        Region::Torso | Region::Head => info.region,
        Region::Limb | Region::Placeholder if parts == SURFACES[0] => Region::Torso,
        Region::Limb | Region::Placeholder => Region::Head,
    }
}
