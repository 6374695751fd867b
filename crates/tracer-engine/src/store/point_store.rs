use thiserror::Error;

use crate::coords::PixelSize;
use crate::scene::{GpuContext, PointScene, Precondition, RenderSurface, SceneError};
use crate::space::{Glob, SpaceError, SpaceMapper};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Space(#[from] SpaceError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Append-only list of globs rendered live through a [`PointScene`].
///
/// Every mutation re-expands the whole list through the space mapper and
/// re-uploads it, so an `add_glob` costs O(n) in the number of stored globs.
/// Stored globs are already mapped into the mapper's canonical space.
pub struct PointStore<C, M> {
    scene: PointScene<C>,
    space: M,
    globs: Vec<Glob>,
}

impl<C: GpuContext, M: SpaceMapper> PointStore<C, M> {
    pub fn new(scene: PointScene<C>, space: M) -> Self {
        Self {
            scene,
            space,
            globs: Vec::new(),
        }
    }

    /// Initializes the scene on `surface` and records the canvas rectangle.
    pub fn init<S>(&mut self, surface: S) -> Result<(), StoreError>
    where
        S: RenderSurface<Context = C>,
    {
        let size = surface.pixel_size();
        self.scene.init(surface)?;

        let rect = self.space.capture_canvas_rect(size);
        log::debug!(
            "canvas rect {}x{} at ({}, {})",
            rect.size.x, rect.size.y, rect.origin.x, rect.origin.y
        );
        Ok(())
    }

    /// Maps `glob` from its own space, appends it, re-buffers and draws.
    ///
    /// Either the glob is stored and drawn, or the error is returned with the
    /// list and the buffered vertices as they were.
    pub fn add_glob(&mut self, glob: Glob) -> Result<(), StoreError> {
        if !self.scene.is_initialized() {
            return Err(SceneError::Precondition(Precondition::NotInitialized).into());
        }

        let mapped = self.space.map_from(glob.space, &glob)?;
        self.globs.push(mapped);

        let pixels = match self.space.all_pixels(&self.globs) {
            Ok(pixels) => pixels,
            Err(err) => {
                self.globs.pop();
                return Err(err.into());
            }
        };

        // buffer_points validates before uploading, so a failure leaves the
        // previous vertices in place.
        if let Err(err) = self.scene.buffer_points(&pixels) {
            self.globs.pop();
            return Err(err.into());
        }

        if let Err(err) = self.scene.draw() {
            self.globs.pop();
            self.restore_buffer();
            return Err(err.into());
        }

        log::debug!(
            "glob #{} at ({:.1}, {:.1}) from {}",
            self.globs.len(),
            mapped.position.x,
            mapped.position.y,
            glob.space
        );
        Ok(())
    }

    /// Draws whatever is buffered, without re-expanding the list.
    pub fn draw(&mut self) -> Result<u32, StoreError> {
        Ok(self.scene.draw()?)
    }

    /// Renders at `scale` device pixels per logical unit.
    ///
    /// The space keeps its logical extent and the scene surface follows the
    /// new pixel size. Nothing is redrawn; call [`draw`](Self::draw) when the
    /// host is ready.
    ///
    /// A scale whose pixel size the device cannot render to fails with
    /// [`SceneError::SurfaceTooLarge`] and leaves the space as it was.
    pub fn set_scale(&mut self, scale: f32) -> Result<(), StoreError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SpaceError::InvalidResolution(scale.recip()).into());
        }

        let logical = (
            self.space.width() * self.space.resolution(),
            self.space.height() * self.space.resolution(),
        );
        self.scene
            .check_size(PixelSize::from_f32(logical.0 * scale, logical.1 * scale))?;

        self.space.set_resolution(scale.recip())?;
        let size = self.space.pixel_size();
        log::info!("scale {scale}: canvas now {}x{}", size.width, size.height);

        if self.scene.is_initialized() {
            self.scene.resize(size)?;
        }
        Ok(())
    }

    /// Follows a host-driven surface resize. Does not redraw.
    pub fn resize_surface(&mut self, size: PixelSize) -> Result<(), StoreError> {
        Ok(self.scene.resize(size)?)
    }

    pub fn globs(&self) -> &[Glob] {
        &self.globs
    }

    pub fn len(&self) -> usize {
        self.globs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    pub fn scene(&self) -> &PointScene<C> {
        &self.scene
    }

    pub fn space(&self) -> &M {
        &self.space
    }

    pub fn space_mut(&mut self) -> &mut M {
        &mut self.space
    }

    /// Puts the expansion of the current list back into the scene.
    fn restore_buffer(&mut self) {
        let restored = self
            .space
            .all_pixels(&self.globs)
            .map_err(StoreError::from)
            .and_then(|pixels| Ok(self.scene.buffer_points(&pixels)?));

        if let Err(err) = restored {
            log::error!("could not restore vertex buffer after failed draw: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::coords::{ColorRgba, Rect, Vec2};
    use crate::scene::testing::{FakeSurface, GpuCall, RecordingContext};
    use crate::scene::SceneState;
    use crate::space::{GlobSpace, SpaceGeometry, SpaceId};

    const CANVAS: SpaceId = SpaceId(0);
    const POINTER: SpaceId = SpaceId(1);
    const RED: ColorRgba = ColorRgba::new(1.0, 0.0, 0.0, 0.4);

    /// Shifts globs one unit right and emits one triangle per glob.
    struct ShiftMapper {
        width: f32,
        height: f32,
        resolution: f32,
        canvas: Option<Rect>,
        mapped: RefCell<Vec<(SpaceId, Glob)>>,
    }

    impl ShiftMapper {
        fn new() -> Self {
            Self {
                width: 512.0,
                height: 384.0,
                resolution: 1.0,
                canvas: None,
                mapped: RefCell::new(Vec::new()),
            }
        }
    }

    impl SpaceMapper for ShiftMapper {
        fn map_from(&self, origin: SpaceId, glob: &Glob) -> Result<Glob, SpaceError> {
            self.mapped.borrow_mut().push((origin, *glob));
            glob.validate()?;
            if origin == SpaceId(9) {
                return Err(SpaceError::UnknownSpace(origin));
            }
            Ok(glob.moved_to(glob.position + Vec2::new(1.0, 0.0), CANVAS))
        }

        fn all_pixels(&self, globs: &[Glob]) -> Result<Vec<f32>, SpaceError> {
            let mut out = Vec::new();
            for g in globs {
                if g.position.y < 0.0 {
                    return Err(SpaceError::MalformedGlob("above canvas".into()));
                }
                for _ in 0..3 {
                    out.extend([g.position.x, g.position.y]);
                    out.extend(g.color.to_array());
                }
            }
            Ok(out)
        }

        fn width(&self) -> f32 {
            self.width
        }

        fn height(&self) -> f32 {
            self.height
        }

        fn resolution(&self) -> f32 {
            self.resolution
        }

        fn set_resolution(&mut self, factor: f32) -> Result<(), SpaceError> {
            self.width = self.width * self.resolution / factor;
            self.height = self.height * self.resolution / factor;
            self.resolution = factor;
            Ok(())
        }

        fn capture_canvas_rect(&mut self, surface: PixelSize) -> Rect {
            let rect = Rect::from_pixel_size(surface);
            self.canvas = Some(rect);
            rect
        }

        fn canvas_rect(&self) -> Option<Rect> {
            self.canvas
        }
    }

    fn shift_store() -> PointStore<RecordingContext, ShiftMapper> {
        let mut store = PointStore::new(PointScene::new(), ShiftMapper::new());
        store.init(FakeSurface::new(PixelSize::new(512, 384))).unwrap();
        store
    }

    fn glob_store(surface: FakeSurface) -> PointStore<RecordingContext, GlobSpace> {
        let mut space = GlobSpace::new(CANVAS, 64.0, 512.0, 384.0);
        space.register(SpaceGeometry::new(POINTER, 1.0, 1.0));
        let mut store = PointStore::new(PointScene::new(), space);
        store.init(surface).unwrap();
        store
    }

    fn ctx<M: SpaceMapper>(store: &PointStore<RecordingContext, M>) -> &RecordingContext {
        store.scene().context().unwrap()
    }

    // ── init ──────────────────────────────────────────────────────────────

    #[test]
    fn init_binds_scene_and_records_canvas_rect() {
        let store = shift_store();
        assert_eq!(store.scene().state(), SceneState::Initialized);
        assert_eq!(store.space().canvas_rect(), Some(Rect::new(0.0, 0.0, 512.0, 384.0)));
        assert!(store.is_empty());
    }

    #[test]
    fn add_before_init_is_a_precondition_error() {
        let mut store = PointStore::new(PointScene::<RecordingContext>::new(), ShiftMapper::new());
        let err = store.add_glob(Glob::new(1.0, 1.0, POINTER, RED)).unwrap_err();
        assert_eq!(err, StoreError::Scene(SceneError::Precondition(Precondition::NotInitialized)));
        assert!(store.space().mapped.borrow().is_empty());
    }

    // ── add_glob ──────────────────────────────────────────────────────────

    #[test]
    fn first_glob_is_mapped_buffered_and_drawn_once() {
        // Normalized pointer space: (0.2, 0.3) lands at (102.4, 115.2).
        let mut store = glob_store(FakeSurface::new(PixelSize::new(512, 384)));
        let glob = Glob::new(0.2, 0.3, POINTER, RED);
        store.add_glob(glob).unwrap();

        let uploads = ctx(&store).uploads();
        assert_eq!(uploads.len(), 1);
        assert!(!uploads[0].is_empty());
        assert_eq!(uploads[0].len() % 6, 0);
        assert_eq!(ctx(&store).draws, vec![6]);

        let stored = store.globs()[0];
        assert_eq!(stored.space, CANVAS);
        assert!((stored.position.x - 102.4).abs() < 1e-3);
        assert!((stored.position.y - 115.2).abs() < 1e-3);
    }

    #[test]
    fn each_glob_is_mapped_from_its_own_space() {
        let mut store = shift_store();
        let a = Glob::new(1.0, 2.0, POINTER, RED);
        let b = Glob::new(3.0, 4.0, CANVAS, RED);
        store.add_glob(a).unwrap();
        store.add_glob(b).unwrap();

        assert_eq!(*store.space().mapped.borrow(), vec![(POINTER, a), (CANVAS, b)]);
    }

    #[test]
    fn buffer_is_full_expansion_of_mapped_list() {
        let mut store = shift_store();
        for i in 0..4 {
            store.add_glob(Glob::new(i as f32, 0.0, POINTER, RED)).unwrap();
        }

        let expected = store.space().all_pixels(store.globs()).unwrap();
        assert_eq!(ctx(&store).buffer, expected);
        assert_eq!(store.globs()[3].position, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn second_add_rebuffers_a_longer_list() {
        let mut store = glob_store(FakeSurface::new(PixelSize::new(512, 384)));
        store.add_glob(Glob::new(0.1, 0.1, POINTER, RED)).unwrap();
        store.add_glob(Glob::new(0.9, 0.9, POINTER, RED)).unwrap();

        let uploads = ctx(&store).uploads();
        assert_eq!(uploads.len(), 2);
        assert!(uploads[1].len() > uploads[0].len());
        // Re-expansion, not an append of the new glob alone.
        assert_eq!(&uploads[1][..uploads[0].len()], uploads[0]);
        assert_eq!(ctx(&store).draws, vec![6, 12]);
    }

    #[test]
    fn mapping_errors_pass_through_and_leave_state_alone() {
        let mut store = shift_store();
        store.add_glob(Glob::new(1.0, 1.0, POINTER, RED)).unwrap();
        let calls_before = ctx(&store).calls.len();

        let err = store.add_glob(Glob::new(f32::NAN, 1.0, POINTER, RED)).unwrap_err();
        assert!(matches!(err, StoreError::Space(SpaceError::MalformedGlob(_))));

        let err = store.add_glob(Glob::new(1.0, 1.0, SpaceId(9), RED)).unwrap_err();
        assert_eq!(err, StoreError::Space(SpaceError::UnknownSpace(SpaceId(9))));

        assert_eq!(store.len(), 1);
        assert_eq!(ctx(&store).calls.len(), calls_before);

        let buffer_len = ctx(&store).buffer.len();
        store.add_glob(Glob::new(2.0, 1.0, POINTER, RED)).unwrap();
        assert_eq!(store.len(), 2);
        assert!(ctx(&store).buffer.len() > buffer_len);
        assert_eq!(ctx(&store).draws.len(), 2);
    }

    #[test]
    fn expansion_failure_rolls_back_the_append() {
        let mut store = shift_store();
        store.add_glob(Glob::new(1.0, 1.0, POINTER, RED)).unwrap();
        let buffer = ctx(&store).buffer.clone();

        let err = store.add_glob(Glob::new(1.0, -5.0, POINTER, RED)).unwrap_err();
        assert!(matches!(err, StoreError::Space(SpaceError::MalformedGlob(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(ctx(&store).buffer, buffer);
        assert_eq!(ctx(&store).draws.len(), 1);
    }

    #[test]
    fn draw_failure_restores_previous_list_and_buffer() {
        let mut store = glob_store(
            FakeSurface::new(PixelSize::new(512, 384)).failing_draw_after(1, "surface lost"),
        );
        store.add_glob(Glob::new(0.5, 0.5, POINTER, RED)).unwrap();
        let buffer = ctx(&store).buffer.clone();

        let err = store.add_glob(Glob::new(0.25, 0.25, POINTER, RED)).unwrap_err();
        assert_eq!(err, StoreError::Scene(SceneError::Surface("surface lost".into())));
        assert_eq!(store.len(), 1);
        assert_eq!(ctx(&store).buffer, buffer);
        assert_eq!(store.scene().vertex_count(), Some(6));
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_reissues_without_reexpanding() {
        let mut store = shift_store();
        store.add_glob(Glob::new(1.0, 1.0, POINTER, RED)).unwrap();
        let uploads = ctx(&store).uploads().len();

        assert_eq!(store.draw().unwrap(), 3);
        assert_eq!(store.draw().unwrap(), 3);
        assert_eq!(ctx(&store).uploads().len(), uploads);
        assert_eq!(ctx(&store).draws, vec![3, 3, 3]);
    }

    #[test]
    fn draw_on_empty_store_renders_nothing() {
        let mut store = shift_store();
        assert_eq!(store.draw().unwrap(), 0);
        assert!(ctx(&store).draws.is_empty());
    }

    // ── set_scale ─────────────────────────────────────────────────────────

    #[test]
    fn scale_two_doubles_pixels_and_does_not_draw() {
        let mut store = glob_store(FakeSurface::new(PixelSize::new(512, 384)));
        store.set_scale(2.0).unwrap();

        assert_eq!(store.space().width(), 1024.0);
        assert_eq!(store.space().resolution(), 0.5);
        assert_eq!(store.scene().size(), Some(PixelSize::new(1024, 768)));
        assert!(ctx(&store).calls.contains(&GpuCall::Resize(PixelSize::new(1024, 768))));
        assert!(ctx(&store).draws.is_empty());

        store.draw().unwrap();
        assert!(ctx(&store).draws.is_empty(), "nothing buffered yet");
    }

    #[test]
    fn rescaling_keeps_stored_globs_and_vertices() {
        let mut store = glob_store(FakeSurface::new(PixelSize::new(512, 384)));
        store.add_glob(Glob::new(0.5, 0.5, POINTER, RED)).unwrap();
        let globs = store.globs().to_vec();
        let pixels = store.space().all_pixels(&globs).unwrap();

        store.set_scale(0.5).unwrap();
        assert_eq!(store.space().width(), 256.0);
        assert_eq!(store.globs(), globs.as_slice());
        assert_eq!(store.space().all_pixels(&globs).unwrap(), pixels);
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let mut store = glob_store(FakeSurface::new(PixelSize::new(512, 384)));
        assert!(store.set_scale(0.0).is_err());
        assert!(store.set_scale(-2.0).is_err());
        assert_eq!(store.space().width(), 512.0);
    }

    #[test]
    fn scale_past_device_limit_is_rejected_and_space_kept() {
        let surface = FakeSurface::new(PixelSize::new(512, 384)).with_max_dimension(2048);
        let mut store = glob_store(surface);

        store.set_scale(4.0).unwrap();
        assert_eq!(store.scene().size(), Some(PixelSize::new(2048, 1536)));
        let calls_before = ctx(&store).calls.len();

        let err = store.set_scale(5.0).unwrap_err();
        assert_eq!(
            err,
            StoreError::Scene(SceneError::SurfaceTooLarge { width: 2560, height: 1920, max: 2048 })
        );
        assert_eq!(store.space().width(), 2048.0);
        assert_eq!(store.space().resolution(), 0.25);
        assert_eq!(store.scene().size(), Some(PixelSize::new(2048, 1536)));
        assert_eq!(ctx(&store).calls.len(), calls_before);

        store.set_scale(1.0).unwrap();
        assert_eq!(store.scene().size(), Some(PixelSize::new(512, 384)));
    }

    #[test]
    fn scale_before_init_only_touches_the_space() {
        let space = GlobSpace::new(CANVAS, 64.0, 512.0, 384.0);
        let mut store = PointStore::new(PointScene::<RecordingContext>::new(), space);
        store.set_scale(2.0).unwrap();
        assert_eq!(store.space().width(), 1024.0);
        assert_eq!(store.scene().size(), None);
    }

    // ── resize_surface ────────────────────────────────────────────────────

    #[test]
    fn surface_resize_leaves_space_untouched() {
        let mut store = shift_store();
        store.resize_surface(PixelSize::new(800, 600)).unwrap();
        assert_eq!(store.scene().size(), Some(PixelSize::new(800, 600)));
        assert_eq!(store.space().width(), 512.0);
        assert!(ctx(&store).draws.is_empty());
    }
}
