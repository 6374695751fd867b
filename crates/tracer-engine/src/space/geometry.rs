use std::fmt;

use crate::coords::Vec2;

/// Identifies a coordinate space. Globs refer to the space they were
/// authored in by id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SpaceId(pub u32);

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "space#{}", self.0)
    }
}

/// Size and resolution of a coordinate space.
///
/// `width`/`height` are device pixels; `resolution` is logical units per
/// device pixel. Positions inside the space are logical units, so the
/// logical extent is `width * resolution` by `height * resolution`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpaceGeometry {
    pub id: SpaceId,
    pub width: f32,
    pub height: f32,
    pub resolution: f32,
}

impl SpaceGeometry {
    /// Geometry at resolution 1 (one logical unit per pixel).
    #[inline]
    pub const fn new(id: SpaceId, width: f32, height: f32) -> Self {
        Self { id, width, height, resolution: 1.0 }
    }

    #[inline]
    pub fn logical_size(&self) -> Vec2 {
        Vec2::new(self.width * self.resolution, self.height * self.resolution)
    }

    /// True when positions cannot be expressed as fractions of the extent.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let s = self.logical_size();
        !(s.is_finite() && s.x > 0.0 && s.y > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_size_applies_resolution() {
        let g = SpaceGeometry { resolution: 0.5, ..SpaceGeometry::new(SpaceId(0), 1024.0, 768.0) };
        assert_eq!(g.logical_size(), Vec2::new(512.0, 384.0));
    }

    #[test]
    fn zero_or_non_finite_extent_is_degenerate() {
        assert!(SpaceGeometry::new(SpaceId(1), 0.0, 10.0).is_degenerate());
        assert!(SpaceGeometry::new(SpaceId(1), f32::NAN, 10.0).is_degenerate());
        assert!(!SpaceGeometry::new(SpaceId(1), 1.0, 1.0).is_degenerate());
    }
}
