//! Coordinate and geometry types shared by the scene, the space mapper and the host.
//!
//! Authoring space (what globs are placed in):
//! - Logical units of a `SpaceGeometry`
//! - Origin top-left
//! - +X right, +Y down
//!
//! Vertex data handed to the scene is already in clip space; no viewport
//! uniform is involved.

mod color;
mod pixel_size;
mod rect;
mod vec2;

pub use color::ColorRgba;
pub use pixel_size::PixelSize;
pub use rect::Rect;
pub use vec2::Vec2;
