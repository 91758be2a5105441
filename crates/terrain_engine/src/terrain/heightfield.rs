//! Heightmap triangulation
//!
//! Each pixel is a height sample; each 2x2 block of samples is a cell split
//! into two triangles. Row index `i` runs along X and column index `j` along
//! Z, both stretched so the sample grid covers the box exactly. The red
//! channel (0..=255) maps linearly onto `[center.y - size.y/2, center.y + size.y/2]`.
//!
//! ```text
//!   Z
//!   ^   c01 ---- c11
//!   |    |    /   |
//!   |    |  /     |
//!   |   c00 ---- c10
//!   +--------------> X
//! ```
//!
//! The cell emits `(c00, c01, c11)` and `(c11, c10, c00)`; with the
//! `(v1 - v3) x (v2 - v1)` normal this winding makes the terrain face +Y.

use std::path::Path;

use crate::assets::{ImageData, TextureHandle};
use crate::foundation::math::{utils::lerp, Vec2, Vec3};
use crate::physics::PlaneTriangle;
use super::mesh::{TerrainMesh, Vertex};
use super::TerrainError;

/// Where and how large the terrain is
#[derive(Debug, Clone, PartialEq)]
pub struct HeightfieldParams {
    /// Center of the terrain box
    pub center: Vec3,
    /// Box size along X, Y and Z
    pub extent: Vec3,
    /// UV repeat count across the whole terrain
    pub max_uv: Vec2,
    /// Texture token copied into every triangle
    pub texture: Option<TextureHandle>,
}

impl HeightfieldParams {
    /// Untextured terrain params
    pub fn new(center: Vec3, extent: Vec3, max_uv: Vec2) -> Self {
        Self {
            center,
            extent,
            max_uv,
            texture: None,
        }
    }
    
    /// Attach a texture
    pub fn with_texture(mut self, texture: Option<TextureHandle>) -> Self {
        self.texture = texture;
        self
    }
    
    fn validate(&self) -> Result<(), TerrainError> {
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(TerrainError::InvalidCenter);
        }
        let e = self.extent;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(e.x) || !positive(e.z) || !e.y.is_finite() || e.y < 0.0 {
            return Err(TerrainError::InvalidExtent { x: e.x, y: e.y, z: e.z });
        }
        if self.max_uv.iter().any(|uv| !uv.is_finite() || *uv < 0.0) {
            return Err(TerrainError::InvalidUvTiling {
                u: self.max_uv.x,
                v: self.max_uv.y,
            });
        }
        Ok(())
    }
}

/// Output of a triangulation: colliders and render mesh, index for index
#[derive(Debug, Clone)]
pub struct Heightfield {
    /// Collision primitives, two per cell
    pub colliders: Vec<PlaneTriangle>,
    /// Render vertices, three per collider
    pub mesh: TerrainMesh,
}

impl Heightfield {
    /// Number of triangles produced
    pub fn triangle_count(&self) -> usize {
        self.colliders.len()
    }
}

/// Converts heightmap images into terrain triangles
pub struct HeightfieldTriangulator;

impl HeightfieldTriangulator {
    /// Triangulate `image` over the box described by `params`
    ///
    /// Fails without producing anything when the image is smaller than 2x2 or
    /// the params are out of range.
    #[allow(clippy::cast_precision_loss)]
    pub fn triangulate(image: &ImageData, params: &HeightfieldParams) -> Result<Heightfield, TerrainError> {
        if image.width < 2 || image.height < 2 {
            return Err(TerrainError::DegenerateImage {
                width: image.width,
                height: image.height,
            });
        }
        params.validate()?;
        
        let rows = image.height - 1;
        let cols = image.width - 1;
        let group_size = rows as usize * cols as usize * 2;
        
        let half = params.extent * 0.5;
        let min = params.center - half;
        let max = params.center + half;
        
        let x_at = |i: u32| lerp(min.x, max.x, i as f32 / rows as f32);
        let z_at = |j: u32| lerp(min.z, max.z, j as f32 / cols as f32);
        let y_at = |j: u32, i: u32| min.y + f32::from(image.red(j, i)) / 255.0 * params.extent.y;
        let uv_at = |i: u32, j: u32| {
            [
                params.max_uv.x * i as f32 / rows as f32,
                params.max_uv.y * j as f32 / cols as f32,
            ]
        };
        
        let mut colliders = Vec::with_capacity(group_size);
        let mut mesh = TerrainMesh::with_capacity(group_size);
        
        for i in 0..rows {
            for j in 0..cols {
                let corner = |a: u32, b: u32| {
                    let (row, col) = (i + a, j + b);
                    (Vec3::new(x_at(row), y_at(col, row), z_at(col)), uv_at(row, col))
                };
                let c00 = corner(0, 0);
                let c01 = corner(0, 1);
                let c10 = corner(1, 0);
                let c11 = corner(1, 1);
                
                for [p1, p2, p3] in [[c00, c01, c11], [c11, c10, c00]] {
                    let triangle = PlaneTriangle::new(p1.0, p2.0, p3.0, params.texture, group_size);
                    let n: [f32; 3] = triangle.normal().into();
                    mesh.push_triangle([
                        Vertex::new(p1.0.into(), n, p1.1),
                        Vertex::new(p2.0.into(), n, p2.1),
                        Vertex::new(p3.0.into(), n, p3.1),
                    ]);
                    colliders.push(triangle);
                }
            }
        }
        
        log::debug!(
            "Triangulated {}x{} heightmap into {} triangles",
            image.width,
            image.height,
            colliders.len()
        );
        
        Ok(Heightfield { colliders, mesh })
    }
    
    /// Load a heightmap from disk and triangulate it
    pub fn triangulate_file<P: AsRef<Path>>(path: P, params: &HeightfieldParams) -> Result<Heightfield, TerrainError> {
        let image = ImageData::from_file(path)?;
        Self::triangulate(&image, params)
    }
}
