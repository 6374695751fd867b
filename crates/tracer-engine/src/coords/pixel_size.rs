/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rounds a floating-point size to whole pixels, never below 1x1.
    #[inline]
    pub fn from_f32(width: f32, height: f32) -> Self {
        Self::new(width.round().max(1.0) as u32, height.round().max(1.0) as u32)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for PixelSize {
    #[inline]
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<PixelSize> for winit::dpi::PhysicalSize<u32> {
    #[inline]
    fn from(size: PixelSize) -> Self {
        winit::dpi::PhysicalSize::new(size.width, size.height)
    }
}
