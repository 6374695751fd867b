use super::{PixelSize, Vec2};

/// Axis-aligned rectangle (top-left origin).
///
/// Used for the canvas rectangle a space records against its surface, in
/// device pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle anchored at the origin covering a whole surface.
    #[inline]
    pub fn from_pixel_size(size: PixelSize) -> Self {
        Self::new(0.0, 0.0, size.width as f32, size.height as f32)
    }
}
