use core::ops::{Add, Sub};

/// 2D vector, in whatever units the owning space uses.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise product.
    #[inline]
    pub fn mul_elem(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x * rhs.x, self.y * rhs.y)
    }

    /// Component-wise quotient.
    #[inline]
    pub fn div_elem(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementwise_ops_are_per_axis() {
        let p = Vec2::new(128.0, 96.0);
        let extent = Vec2::new(512.0, 384.0);
        assert_eq!(p.div_elem(extent), Vec2::new(0.25, 0.25));
        assert_eq!(Vec2::new(0.5, 0.25).mul_elem(extent), Vec2::new(256.0, 96.0));
    }

    #[test]
    fn non_finite_components_are_detected() {
        assert!(Vec2::new(1.0, 2.0).is_finite());
        assert!(!Vec2::new(f32::INFINITY, 2.0).is_finite());
        assert!(!Vec2::new(0.0, f32::NAN).is_finite());
    }
}
