//! Collision geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - Static terrain triangles with precomputed planes
//!
//! # Key Types
//!
//! - [`PlaneTriangle`] - Immutable terrain face used for sphere sweeps
//! - [`Barycentric`] - Inside/outside weights for a point on a triangle

pub mod primitives;

// Re-export commonly used types
pub use primitives::{Barycentric, PlaneTriangle};
