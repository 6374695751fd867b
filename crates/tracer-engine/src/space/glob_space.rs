use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::coords::{PixelSize, Rect, Vec2};

use super::{Glob, SpaceError, SpaceGeometry, SpaceId, SpaceMapper};

/// One interleaved vertex as the point program reads it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 2], // clip space
    pub color: [f32; 4],
}

/// Vertices emitted per glob (two triangles).
pub(crate) const VERTICES_PER_GLOB: usize = 6;

/// Canonical canvas space that renders globs as squares.
///
/// Each glob becomes an axis-aligned square of `glob_size` logical units
/// centered on its position. Other spaces are known through
/// [`register`](Self::register) and can be mapped from.
#[derive(Debug, Clone)]
pub struct GlobSpace {
    geometry: SpaceGeometry,
    glob_size: f32,
    origins: HashMap<SpaceId, SpaceGeometry>,
    canvas_rect: Option<Rect>,
}

impl GlobSpace {
    /// Creates a space of `width` x `height` pixels at resolution 1.
    pub fn new(id: SpaceId, glob_size: f32, width: f32, height: f32) -> Self {
        Self {
            geometry: SpaceGeometry::new(id, width, height),
            glob_size,
            origins: HashMap::new(),
            canvas_rect: None,
        }
    }

    #[inline]
    pub fn id(&self) -> SpaceId {
        self.geometry.id
    }

    #[inline]
    pub fn geometry(&self) -> SpaceGeometry {
        self.geometry
    }

    #[inline]
    pub fn glob_size(&self) -> f32 {
        self.glob_size
    }

    /// Makes `origin` available to [`SpaceMapper::map_from`], replacing any
    /// previous geometry with the same id. This space's own id always
    /// resolves to itself.
    pub fn register(&mut self, origin: SpaceGeometry) {
        if origin.id == self.id() {
            log::warn!("ignoring registration of {} over the canonical space", origin.id);
            return;
        }
        self.origins.insert(origin.id, origin);
    }

    fn origin(&self, id: SpaceId) -> Result<SpaceGeometry, SpaceError> {
        if id == self.id() {
            return Ok(self.geometry);
        }
        self.origins
            .get(&id)
            .copied()
            .ok_or(SpaceError::UnknownSpace(id))
    }

    /// Logical position → clip space (top-left origin, +Y down).
    #[inline]
    fn to_clip(&self, p: Vec2, extent: Vec2) -> [f32; 2] {
        [2.0 * p.x / extent.x - 1.0, 1.0 - 2.0 * p.y / extent.y]
    }

    fn push_square(&self, glob: &Glob, extent: Vec2, out: &mut Vec<PointVertex>) {
        let half = self.glob_size * 0.5;
        let min = glob.position - Vec2::new(half, half);
        let max = glob.position + Vec2::new(half, half);

        let tl = self.to_clip(min, extent);
        let tr = self.to_clip(Vec2::new(max.x, min.y), extent);
        let br = self.to_clip(max, extent);
        let bl = self.to_clip(Vec2::new(min.x, max.y), extent);

        let color = glob.color.to_array();
        out.extend(
            [tl, tr, br, tl, br, bl]
                .into_iter()
                .map(|position| PointVertex { position, color }),
        );
    }
}

impl SpaceMapper for GlobSpace {
    fn map_from(&self, origin: SpaceId, glob: &Glob) -> Result<Glob, SpaceError> {
        if glob.space != origin {
            return Err(SpaceError::SpaceMismatch {
                expected: origin,
                found: glob.space,
            });
        }
        glob.validate()?;

        let from = self.origin(origin)?;
        if from.is_degenerate() {
            return Err(SpaceError::DegenerateSpace(origin));
        }
        if self.geometry.is_degenerate() {
            return Err(SpaceError::DegenerateSpace(self.id()));
        }

        let fraction = glob.position.div_elem(from.logical_size());
        let position = fraction.mul_elem(self.geometry.logical_size());
        Ok(glob.moved_to(position, self.id()))
    }

    fn all_pixels(&self, globs: &[Glob]) -> Result<Vec<f32>, SpaceError> {
        if self.geometry.is_degenerate() {
            return Err(SpaceError::DegenerateSpace(self.id()));
        }
        let extent = self.geometry.logical_size();

        let mut vertices = Vec::with_capacity(globs.len() * VERTICES_PER_GLOB);
        for glob in globs {
            if glob.space != self.id() {
                return Err(SpaceError::SpaceMismatch {
                    expected: self.id(),
                    found: glob.space,
                });
            }
            glob.validate()?;
            self.push_square(glob, extent, &mut vertices);
        }

        Ok(bytemuck::cast_slice::<PointVertex, f32>(&vertices).to_vec())
    }

    fn width(&self) -> f32 {
        self.geometry.width
    }

    fn height(&self) -> f32 {
        self.geometry.height
    }

    fn resolution(&self) -> f32 {
        self.geometry.resolution
    }

    fn set_resolution(&mut self, factor: f32) -> Result<(), SpaceError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(SpaceError::InvalidResolution(factor));
        }

        let logical = self.geometry.logical_size();
        self.geometry.resolution = factor;
        self.geometry.width = logical.x / factor;
        self.geometry.height = logical.y / factor;
        Ok(())
    }

    fn capture_canvas_rect(&mut self, surface: PixelSize) -> Rect {
        let rect = Rect::from_pixel_size(surface);
        self.canvas_rect = Some(rect);
        rect
    }

    fn canvas_rect(&self) -> Option<Rect> {
        self.canvas_rect
    }
}
