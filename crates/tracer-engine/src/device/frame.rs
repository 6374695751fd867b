/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly with
/// [`Gpu::submit`](super::Gpu::submit). Holding the surface texture prevents
/// acquisition of subsequent frames.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What a draw should do after failing to acquire a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next draw may succeed.
    Reconfigured,
    /// Transient error; this draw is dropped.
    SkipFrame,
    /// Unrecoverable (commonly OOM); the scene reports an error.
    Fatal,
}
