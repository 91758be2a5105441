//! Physics module for collision detection and response
//!
//! Entities are spheres; the only static geometry is the terrain triangle
//! list. Resolution is purely positional: there is no velocity or momentum,
//! just corrections applied once per simulation tick.

pub mod collision;
pub mod entity;
pub mod collision_world;

pub use collision::{Barycentric, PlaneTriangle};
pub use entity::{Entity, EntityHandle};
pub use collision_world::{CollisionWorld, TickSummary};
