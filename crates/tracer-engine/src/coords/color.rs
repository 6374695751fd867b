/// Straight (non-premultiplied) RGBA color, each channel in `[0, 1]`.
///
/// Globs carry this color verbatim into the vertex buffer; blending is done
/// by the pipeline using the alpha channel.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Swatch color from 8-bit channels with an explicit alpha.
    ///
    /// Channels are divided by 256 so that `255` stays strictly below `1.0`.
    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 256.0, g as f32 / 256.0, b as f32 / 256.0, a)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// True when every channel is finite and within `[0, 1]`.
    #[inline]
    pub fn is_normalized(self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }
}
