//! Coordinate spaces and glob expansion.
//!
//! A glob is authored in some origin space (for instance the pointer space of
//! a window) and mapped into the canonical space of the canvas that renders
//! it. The [`SpaceMapper`] trait is the contract the point store relies on;
//! [`GlobSpace`] is the implementation the studio uses.

mod geometry;
mod glob;
mod glob_space;
mod mapper;

pub use geometry::{SpaceGeometry, SpaceId};
pub use glob::Glob;
pub use glob_space::{GlobSpace, PointVertex};
pub use mapper::{SpaceError, SpaceMapper};
