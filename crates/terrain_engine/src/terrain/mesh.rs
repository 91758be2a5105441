//! Render-side terrain geometry
//!
//! Three vertices per terrain triangle, in the same order as the collider
//! list, so a triangle index addresses both.

use std::ops::Range;

use crate::assets::TextureHandle;
use crate::physics::PlaneTriangle;

/// Vertex data structure for terrain rendering
///
/// `#[repr(C)]` keeps the layout stable for GPU buffer uploads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],
    
    /// Normal vector (the owning triangle's face normal)
    pub normal: [f32; 3],
    
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

// Only f32 arrays, no padding
unsafe impl bytemuck::Pod for Vertex {}
unsafe impl bytemuck::Zeroable for Vertex {}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Flat triangle list for the terrain surface
#[derive(Debug, Clone, Default)]
pub struct TerrainMesh {
    /// Three vertices per triangle, no index buffer
    pub vertices: Vec<Vertex>,
}

impl TerrainMesh {
    /// Create an empty mesh with room for `triangles` triangles
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 3),
        }
    }
    
    /// Append one triangle
    pub fn push_triangle(&mut self, triangle: [Vertex; 3]) {
        self.vertices.extend_from_slice(&triangle);
    }
    
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
    
    /// Vertex range covered by a batch, clamped to the buffer
    pub fn vertex_range(&self, batch: &TextureBatch) -> Range<usize> {
        let start = (batch.first_triangle * 3).min(self.vertices.len());
        let end = ((batch.first_triangle + batch.triangle_count) * 3).min(self.vertices.len());
        start..end
    }
    
    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// A run of consecutive triangles drawn with one texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureBatch {
    /// Index of the first triangle in the run
    pub first_triangle: usize,
    /// Number of triangles in the run
    pub triangle_count: usize,
    /// Texture bound for the run, `None` for untextured
    pub texture: Option<TextureHandle>,
}

/// Split colliders into draw batches
///
/// Starts at triangle 0, takes the group size and texture of the first
/// triangle of each run and jumps past the run. A group size of zero is
/// treated as one so the walk always advances.
pub fn texture_batches(triangles: &[PlaneTriangle]) -> Vec<TextureBatch> {
    let mut batches = Vec::new();
    let mut index = 0;
    
    while index < triangles.len() {
        let head = &triangles[index];
        let count = head.group_size().max(1).min(triangles.len() - index);
        batches.push(TextureBatch {
            first_triangle: index,
            triangle_count: count,
            texture: head.texture(),
        });
        index += count;
    }
    
    batches
}
