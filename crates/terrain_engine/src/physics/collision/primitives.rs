//! Primitive collision shapes and intersection algorithms
//!
//! [`PlaneTriangle`] is the only static collider in the game: one terrain
//! face with its implicit plane precomputed so point distances are a single
//! dot product.

use crate::assets::TextureHandle;
use crate::foundation::math::Vec3;

/// Barycentric coordinates of a point relative to a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    /// Weight of the first vertex
    pub u: f32,
    /// Weight of the second vertex
    pub v: f32,
    /// Weight of the third vertex
    pub w: f32,
}

impl Barycentric {
    /// Whether the point lies inside the triangle or on its boundary
    pub fn is_inside(&self) -> bool {
        self.v >= 0.0 && self.w >= 0.0 && (self.v + self.w) <= 1.0
    }
}

/// A static terrain triangle with its implicit plane `A·x + B·y + C·z + D = 0`
///
/// Coefficients are derived once in [`PlaneTriangle::new`] and never change.
/// The normal follows the counter-clockwise winding of `(v1, v2, v3)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneTriangle {
    v1: Vec3,
    v2: Vec3,
    v3: Vec3,
    normal: Vec3,
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    texture: Option<TextureHandle>,
    group_size: usize,
}

impl PlaneTriangle {
    /// Build a triangle and derive its plane
    ///
    /// `group_size` is the number of consecutive triangles that share this
    /// texture for batched drawing; collision ignores it. A triangle whose
    /// edges are parallel (relative to their own lengths) gets a zero normal
    /// and never produces a contact.
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3, texture: Option<TextureHandle>, group_size: usize) -> Self {
        let e1 = v1 - v3;
        let e2 = v2 - v1;
        let cross = e1.cross(&e2);
        let length = cross.norm();
        let normal = if length.is_finite() && length > f32::EPSILON * e1.norm() * e2.norm() {
            cross / length
        } else {
            Vec3::zeros()
        };
        
        let (a, b, c) = (normal.x, normal.y, normal.z);
        let d = -(a * v1.x + b * v1.y + c * v1.z);
        
        Self {
            v1,
            v2,
            v3,
            normal,
            a,
            b,
            c,
            d,
            texture,
            group_size,
        }
    }
    
    /// Untextured triangle outside any render group
    pub fn from_vertices(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self::new(v1, v2, v3, None, 1)
    }
    
    /// Vertices in winding order
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v1, self.v2, self.v3]
    }
    
    /// Unit normal (zero for a degenerate triangle)
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
    
    /// Whether the triangle has no usable plane (zero normal)
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::zeros()
    }
    
    /// Plane coefficients `(A, B, C, D)`
    pub fn plane(&self) -> [f32; 4] {
        [self.a, self.b, self.c, self.d]
    }
    
    /// Texture token handed through to the renderer
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }
    
    /// Triangles in this texture group
    pub fn group_size(&self) -> usize {
        self.group_size
    }
    
    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v1 + self.v2 + self.v3) * (1.0 / 3.0)
    }
    
    /// Signed distance from `point` to the plane, positive on the normal side
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.a * point.x + self.b * point.y + self.c * point.z + self.d
    }
    
    /// Barycentric coordinates of `point` projected into the triangle's plane
    ///
    /// Returns `None` when the triangle is degenerate (zero determinant).
    pub fn barycentric(&self, point: &Vec3) -> Option<Barycentric> {
        let e0 = self.v2 - self.v1;
        let e1 = self.v3 - self.v1;
        let e2 = point - self.v1;
        
        let d00 = e0.dot(&e0);
        let d01 = e0.dot(&e1);
        let d11 = e1.dot(&e1);
        let d20 = e2.dot(&e0);
        let d21 = e2.dot(&e1);
        let denom = d00 * d11 - d01 * d01;
        
        // Relative to the edge lengths so tiny but valid triangles survive
        if !denom.is_finite() || denom.abs() <= f32::EPSILON * d00 * d11 {
            return None;
        }
        
        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        Some(Barycentric { u: 1.0 - v - w, v, w })
    }
    
    /// Swept sphere test against this face
    ///
    /// A sphere of `radius` that moved from `previous` to `position` is a
    /// candidate when it crossed the plane or sits closer to it than its
    /// radius. The candidate point is the projection of `position` onto the
    /// plane, pulled `radius` towards the centroid, and must fall inside the
    /// triangle. Returns the displacement that puts the center `radius` in
    /// front of the plane.
    pub fn sphere_contact(&self, position: &Vec3, previous: &Vec3, radius: f32) -> Option<Vec3> {
        if self.is_degenerate() {
            return None;
        }
        
        let curr_dist = self.signed_distance(position);
        let prev_dist = self.signed_distance(previous);
        
        let crossed = curr_dist * prev_dist < 0.0;
        if !crossed && curr_dist.abs() >= radius {
            return None;
        }
        
        let projected = position - self.normal * curr_dist;
        let to_centroid = self.centroid() - projected;
        let nudged = match to_centroid.try_normalize(f32::EPSILON) {
            Some(direction) => projected + direction * radius,
            None => projected,
        };
        
        let coords = self.barycentric(&nudged)?;
        if !coords.is_inside() {
            return None;
        }
        
        Some(self.normal * (radius - curr_dist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor_triangle() -> PlaneTriangle {
        // Counter-clockwise seen from +Y
        PlaneTriangle::from_vertices(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(4.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_plane_coefficients_vanish_on_vertices() {
        let tri = PlaneTriangle::from_vertices(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        
        // This winding faces down
        assert_relative_eq!(tri.normal(), Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(tri.normal().norm(), 1.0, epsilon = 1e-6);
        for vertex in tri.vertices() {
            assert_relative_eq!(tri.signed_distance(&vertex), 0.0, epsilon = 1e-6);
        }
    }
    
    #[test]
    fn test_plane_on_tilted_triangle() {
        let tri = PlaneTriangle::from_vertices(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-2.0, 5.0, 1.0),
            Vec3::new(4.0, -1.0, 7.0),
        );
        let [a, b, c, _] = tri.plane();
        assert_relative_eq!(Vec3::new(a, b, c), tri.normal());
        for vertex in tri.vertices() {
            assert_relative_eq!(tri.signed_distance(&vertex), 0.0, epsilon = 1e-5);
        }
        
        let above = tri.centroid() + tri.normal() * 2.5;
        assert_relative_eq!(tri.signed_distance(&above), 2.5, epsilon = 1e-5);
    }
    
    #[test]
    fn test_reversed_winding_flips_normal() {
        let tri = floor_triangle();
        let [v1, v2, v3] = tri.vertices();
        let flipped = PlaneTriangle::from_vertices(v1, v3, v2);
        assert_relative_eq!(tri.normal(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(flipped.normal(), -tri.normal(), epsilon = 1e-6);
    }
    
    #[test]
    fn test_barycentric_inside_and_outside() {
        let tri = floor_triangle();
        
        let centroid = tri.barycentric(&tri.centroid()).unwrap();
        assert!(centroid.is_inside());
        assert_relative_eq!(centroid.u, 1.0 / 3.0, epsilon = 1e-5);
        assert_relative_eq!(centroid.v, 1.0 / 3.0, epsilon = 1e-5);
        
        let vertex = tri.barycentric(&Vec3::new(0.0, 0.0, 4.0)).unwrap();
        assert!(vertex.is_inside());
        
        let outside = tri.barycentric(&Vec3::new(3.0, 0.0, 3.0)).unwrap();
        assert!(!outside.is_inside());
    }
    
    #[test]
    fn test_degenerate_triangle_is_never_inside() {
        let sliver = PlaneTriangle::from_vertices(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(sliver.normal(), Vec3::zeros());
        assert!(sliver.is_degenerate());
        assert!(sliver.barycentric(&Vec3::new(1.0, 0.0, 0.0)).is_none());
        assert!(sliver
            .sphere_contact(&Vec3::new(1.0, 0.0, 0.0), &Vec3::new(1.0, 0.0, 0.0), 0.5)
            .is_none());
    }
    
    #[test]
    fn test_tiny_triangle_keeps_unit_normal() {
        let tiny = PlaneTriangle::from_vertices(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0e-4),
            Vec3::new(3.0e-4, 0.0, 0.0),
        );
        assert!(!tiny.is_degenerate());
        assert_relative_eq!(tiny.normal(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        
        let far = Vec3::new(1.0e-4, 100.0, 1.0e-4);
        assert_relative_eq!(tiny.signed_distance(&far), 100.0, epsilon = 1e-4);
        assert!(tiny.sphere_contact(&far, &far, 0.1).is_none());
    }
    
    #[test]
    fn test_sphere_resting_inside_footprint_is_pushed_out() {
        let tri = floor_triangle();
        let position = Vec3::new(1.0, 0.05, 1.0);
        
        let push = tri.sphere_contact(&position, &position, 0.1).unwrap();
        assert_relative_eq!(push, Vec3::new(0.0, 0.05, 0.0), epsilon = 1e-6);
        assert_relative_eq!(tri.signed_distance(&(position + push)), 0.1, epsilon = 1e-6);
    }
    
    #[test]
    fn test_sphere_crossing_plane_is_caught() {
        let tri = floor_triangle();
        let previous = Vec3::new(1.0, 0.5, 1.0);
        let position = Vec3::new(1.0, -0.5, 1.0);
        
        let push = tri.sphere_contact(&position, &previous, 0.1).unwrap();
        assert_relative_eq!(push, Vec3::new(0.0, 0.6, 0.0), epsilon = 1e-6);
    }
    
    #[test]
    fn test_far_sphere_has_no_contact() {
        let tri = floor_triangle();
        let position = Vec3::new(1.0, 2.0, 1.0);
        assert!(tri.sphere_contact(&position, &Vec3::new(1.0, 3.0, 1.0), 0.1).is_none());
    }
    
    #[test]
    fn test_near_plane_but_outside_footprint_has_no_contact() {
        let tri = floor_triangle();
        let position = Vec3::new(6.0, 0.05, 6.0);
        assert!(tri.sphere_contact(&position, &position, 0.1).is_none());
    }
}
