use crate::coords::{ColorRgba, Vec2};

use super::{SpaceError, SpaceId};

/// A user-placed colored point.
///
/// `position` is in logical units of `space`. Globs are values: the store
/// never edits one after appending it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glob {
    pub position: Vec2,
    pub space: SpaceId,
    pub color: ColorRgba,
}

impl Glob {
    #[inline]
    pub const fn new(x: f32, y: f32, space: SpaceId, color: ColorRgba) -> Self {
        Self {
            position: Vec2::new(x, y),
            space,
            color,
        }
    }

    /// Same glob re-expressed at `position` in `space`.
    #[inline]
    pub fn moved_to(self, position: Vec2, space: SpaceId) -> Self {
        Self { position, space, ..self }
    }

    /// Rejects non-finite positions and colors outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if !self.position.is_finite() {
            return Err(SpaceError::MalformedGlob(format!(
                "non-finite position ({}, {})",
                self.position.x, self.position.y
            )));
        }
        if !self.color.is_normalized() {
            return Err(SpaceError::MalformedGlob(format!(
                "color {:?} outside [0, 1]",
                self.color.to_array()
            )));
        }
        Ok(())
    }
}
