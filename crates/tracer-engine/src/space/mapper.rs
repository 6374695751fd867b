use thiserror::Error;

use crate::coords::{PixelSize, Rect};

use super::{Glob, SpaceId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpaceError {
    #[error("unknown origin space {0}")]
    UnknownSpace(SpaceId),

    #[error("glob belongs to {found}, expected {expected}")]
    SpaceMismatch { expected: SpaceId, found: SpaceId },

    #[error("malformed glob: {0}")]
    MalformedGlob(String),

    #[error("{0} has an empty or non-finite extent")]
    DegenerateSpace(SpaceId),

    #[error("invalid resolution factor {0}")]
    InvalidResolution(f32),
}

/// Maps globs between spaces and expands them into vertex data.
///
/// The point store only talks to this trait; how a glob becomes triangles is
/// entirely up to the implementation.
pub trait SpaceMapper {
    /// Re-expresses `glob`, authored in `origin`, in this space.
    fn map_from(&self, origin: SpaceId, glob: &Glob) -> Result<Glob, SpaceError>;

    /// Expands an ordered glob list (already in this space) into a flat vertex
    /// buffer, 6 floats per vertex, triangle list, list order preserved.
    fn all_pixels(&self, globs: &[Glob]) -> Result<Vec<f32>, SpaceError>;

    /// Width in device pixels.
    fn width(&self) -> f32;

    /// Height in device pixels.
    fn height(&self) -> f32;

    /// Logical units per device pixel.
    fn resolution(&self) -> f32;

    /// Changes the resolution; the logical extent is unchanged, so the pixel
    /// dimensions follow.
    fn set_resolution(&mut self, factor: f32) -> Result<(), SpaceError>;

    /// Records the rectangle the canvas occupies on its surface.
    fn capture_canvas_rect(&mut self, surface: PixelSize) -> Rect;

    fn canvas_rect(&self) -> Option<Rect>;

    /// Pixel dimensions rounded for a surface.
    fn pixel_size(&self) -> PixelSize {
        PixelSize::from_f32(self.width(), self.height())
    }
}
