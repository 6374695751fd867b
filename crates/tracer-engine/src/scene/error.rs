use thiserror::Error;

/// Which ordering rule a scene call broke.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Precondition {
    /// `buffer_points`, `draw` or `resize` before `init`.
    NotInitialized,
    /// `init` on a scene that is already bound to a surface.
    AlreadyInitialized,
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precondition::NotInitialized => f.write_str("scene used before init"),
            Precondition::AlreadyInitialized => f.write_str("scene already initialized"),
        }
    }
}

/// Failure to turn the point shader into a usable program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgramError {
    /// The shader source did not compile; carries the compiler log.
    #[error("shader compilation failed:\n{log}")]
    Compile { log: String },

    /// The stages or the vertex layout do not fit together.
    #[error("program link failed: {log}")]
    Link { log: String },
}

/// Errors reported by [`PointScene`](super::PointScene).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// GPU context unavailable or program build failure. Fatal for the scene.
    #[error("scene initialization failed: {0}")]
    Initialization(String),

    /// Operation invoked out of state-machine order.
    #[error("precondition violated: {0}")]
    Precondition(Precondition),

    /// Vertex data length is not a whole number of vertices (or too many to draw).
    #[error("invalid vertex data length {len}: expected a multiple of {stride} floats")]
    BufferValidation { len: usize, stride: usize },

    /// Requested surface is larger than the device can render to.
    #[error("surface {width}x{height} exceeds device limit {max}")]
    SurfaceTooLarge { width: u32, height: u32, max: u32 },

    /// Frame acquisition failed in a way the surface cannot recover from.
    #[error("surface failure: {0}")]
    Surface(String),
}

impl From<ProgramError> for SceneError {
    fn from(err: ProgramError) -> Self {
        SceneError::Initialization(err.to_string())
    }
}
