//! Heightmap terrain
//!
//! Turns a grayscale image into two parallel outputs that share one triangle
//! ordering: [`PlaneTriangle`](crate::physics::PlaneTriangle) colliders for
//! physics and a [`TerrainMesh`] vertex buffer for presentation.

pub mod heightfield;
pub mod mesh;

pub use heightfield::{Heightfield, HeightfieldParams, HeightfieldTriangulator};
pub use mesh::{texture_batches, TerrainMesh, TextureBatch, Vertex};

use thiserror::Error;

use crate::assets::AssetError;

/// Terrain construction errors
///
/// Every variant is raised before anything is committed to a world.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// Heightmap needs at least two pixels on each axis
    #[error("Heightmap must be at least 2x2 pixels, got {width}x{height}")]
    DegenerateImage {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },
    
    /// Extent must be positive on X and Z and non-negative on Y
    #[error("Invalid terrain extent ({x}, {y}, {z})")]
    InvalidExtent {
        /// Size along X
        x: f32,
        /// Size along Y
        y: f32,
        /// Size along Z
        z: f32,
    },
    
    /// Center has a NaN or infinite component
    #[error("Terrain center must be finite")]
    InvalidCenter,
    
    /// UV tiling must be finite and non-negative
    #[error("Invalid UV tiling ({u}, {v})")]
    InvalidUvTiling {
        /// Repeat count along the first texture axis
        u: f32,
        /// Repeat count along the second texture axis
        v: f32,
    },
    
    /// The world's terrain is fixed once built
    #[error("Terrain has already been built for this world")]
    AlreadyBuilt,
    
    /// Heightmap could not be loaded
    #[error("Heightmap asset error: {0}")]
    Asset(#[from] AssetError),
}
