// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pixel metadata for limb and body-surface stamps.
//!
//! Entries are keyed by the ordered part pair or quad they decorate. A lookup
//! either resolves to a [`RenderInfo`] or reports the key it could not find;
//! callers render the placeholder for unresolved keys.

use std::collections::HashMap;

use crate::topology::{BONES, Bone, BodyPart, SURFACES, Surface};

/// What a catalog entry depicts. Drives per-pass selection of surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Limb segment between two joints.
    Limb,
    /// Shoulders-to-hips body. At most one is drawn per pose.
    Torso,
    /// Head variant. Only the best-scoring one is drawn per pose.
    Head,
    /// Fallback for unmatched keys. Always drawn, never selected.
    Placeholder,
}

/// Static pixel metadata for one stamp image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInfo {
    /// Asset identifier, resolved by the drawing surface.
    pub image: String,
    /// Local x offset of the bitmap relative to the anchor keypoint.
    pub x: f32,
    /// Local y offset of the bitmap relative to the anchor keypoint.
    pub y: f32,
    /// Nominal span between the anchoring keypoints along the image x axis.
    pub width: f32,
    /// Nominal span between the anchoring keypoints along the image y axis.
    pub height: f32,
    /// Drawn bitmap width.
    pub image_width: f32,
    /// Drawn bitmap height.
    pub image_height: f32,
    /// Weight when several head variants match the same pose.
    pub strength: f32,
    pub region: Region,
}

impl RenderInfo {
    /// Limb stamp: a 200x600 bitmap whose joints sit 400px apart, starting
    /// 100px below the top edge and centered horizontally.
    #[must_use]
    pub fn limb(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            x: -100.0,
            y: -100.0,
            width: 200.0,
            height: 400.0,
            image_width: 200.0,
            image_height: 600.0,
            strength: 1.0,
            region: Region::Limb,
        }
    }

    /// Placeholder for an unmatched bone. Same geometry as [`RenderInfo::limb`].
    #[must_use]
    pub fn bone_placeholder(image: impl Into<String>) -> Self {
        Self {
            strength: 0.0,
            region: Region::Placeholder,
            ..Self::limb(image)
        }
    }

    /// Placeholder for an unmatched surface: a square stamp spanning the quad.
    #[must_use]
    pub fn surface_placeholder(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            image_width: 100.0,
            image_height: 100.0,
            strength: 0.0,
            region: Region::Placeholder,
        }
    }

    fn surface(
        image: String,
        region: Region,
        (x, y): (f32, f32),
        (width, height): (f32, f32),
        (image_width, image_height): (f32, f32),
        strength: f32,
    ) -> Self {
        Self {
            image,
            x,
            y,
            width,
            height,
            image_width,
            image_height,
            strength,
            region,
        }
    }
}

/// Result of a catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderLookup<'a, K> {
    /// The key has an entry.
    Resolved(&'a RenderInfo),
    /// No entry; carries the attempted key.
    Unresolved(K),
}

impl<'a, K> RenderLookup<'a, K> {
    /// The resolved entry, or `fallback` for an unresolved key.
    pub fn info_or(self, fallback: &'a RenderInfo) -> &'a RenderInfo {
        match self {
            Self::Resolved(info) => info,
            Self::Unresolved(_) => fallback,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Human-readable form of a bone or surface key (`leftShoulder_leftElbow`).
#[must_use]
pub fn key_name(parts: &[BodyPart]) -> String {
    parts
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join("_")
}

/// Render metadata for every bone and surface that has artwork.
#[derive(Debug, Clone, Default)]
pub struct RenderCatalog {
    bones: HashMap<Bone, RenderInfo>,
    surfaces: HashMap<Surface, RenderInfo>,
}

impl RenderCatalog {
    /// Empty catalog: every lookup is unresolved.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog with the bundled limb, torso and head artwork.
    #[must_use]
    pub fn standard() -> Self {
        let limb_images = [
            "leftBicep.png",
            "leftForearm.png",
            "leftThigh.png",
            "leftShin.png",
            "rightBicep.png",
            "rightForearm.png",
            "rightThigh.png",
            "rightShin.png",
        ];
        let bones = BONES
            .iter()
            .zip(limb_images)
            .map(|(&bone, image)| (bone, RenderInfo::limb(image)))
            .collect();

        // Order matches SURFACES
        let surface_infos = [
            RenderInfo::surface(
                "torso.png".into(),
                Region::Torso,
                (-50.0, -40.0),
                (200.0, 300.0),
                (300.0, 400.0),
                1.0,
            ),
            RenderInfo::surface(
                "headLeft.png".into(),
                Region::Head,
                (-150.0, -220.0),
                (70.0, 180.0),
                (300.0, 360.0),
                0.9,
            ),
            RenderInfo::surface(
                "headRight.png".into(),
                Region::Head,
                (-80.0, -220.0),
                (70.0, 180.0),
                (300.0, 360.0),
                0.9,
            ),
            RenderInfo::surface(
                "headThreeQuarterLeft.png".into(),
                Region::Head,
                (-110.0, -220.0),
                (110.0, 180.0),
                (300.0, 360.0),
                1.1,
            ),
            RenderInfo::surface(
                "headThreeQuarterRight.png".into(),
                Region::Head,
                (-90.0, -220.0),
                (110.0, 180.0),
                (300.0, 360.0),
                1.1,
            ),
            RenderInfo::surface(
                "headFront.png".into(),
                Region::Head,
                (-120.0, -200.0),
                (60.0, 180.0),
                (300.0, 360.0),
                2.0,
            ),
        ];
        let surfaces = SURFACES.iter().copied().zip(surface_infos).collect();

        Self { bones, surfaces }
    }

    /// Add or replace a bone entry.
    pub fn insert_bone(&mut self, bone: Bone, info: RenderInfo) {
        self.bones.insert(bone, info);
    }

    /// Add or replace a surface entry.
    pub fn insert_surface(&mut self, surface: Surface, info: RenderInfo) {
        self.surfaces.insert(surface, info);
    }

    /// Drop a surface entry, returning it.
    pub fn remove_surface(&mut self, surface: &Surface) -> Option<RenderInfo> {
        self.surfaces.remove(surface)
    }

    /// Look up the limb stamp for an ordered bone.
    #[must_use]
    pub fn bone(&self, bone: Bone) -> RenderLookup<'_, Bone> {
        self.bones
            .get(&bone)
            .map_or(RenderLookup::Unresolved(bone), RenderLookup::Resolved)
    }

    /// Look up the region stamp for an ordered quad.
    #[must_use]
    pub fn surface(&self, surface: Surface) -> RenderLookup<'_, Surface> {
        self.surfaces
            .get(&surface)
            .map_or(RenderLookup::Unresolved(surface), RenderLookup::Resolved)
    }
}
