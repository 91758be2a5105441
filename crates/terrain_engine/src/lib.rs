//! # Terrain Engine
//!
//! Collision core for a small first-person terrain demo: a heightmap is
//! triangulated into static plane colliders, and a handful of spherical
//! entities are pushed apart from each other and out of the terrain on a
//! fixed simulation tick.
//!
//! ## Features
//!
//! - **Heightfield Triangulation**: Grayscale image to collider triangles plus a render mesh
//! - **Collision World**: Sphere-sphere separation and swept plane/barycentric terrain tests
//! - **Fixed-Step Clock**: Physics rate decoupled from the render loop
//! - **Defeat Signal**: Monotonic flag consumed by the HUD overlay
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use terrain_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let heightmap = ImageData::from_file("resources/Teren.png")?;
//!     let mut world = CollisionWorld::new(PhysicsConfig::default());
//!
//!     let params = HeightfieldParams::new(
//!         Vec3::new(0.0, -1.0, 0.0),
//!         Vec3::new(100.0, 5.0, 10.0),
//!         Vec2::new(10.0, 10.0),
//!     );
//!     let triangles = world.build_terrain(&heightmap, &params)?;
//!     log::info!("terrain has {} triangles", triangles);
//!
//!     let player = world.add_entity(Entity::new("Player", Vec3::new(-20.0, 4.0, -3.0), 0.1));
//!     world.tick();
//!     if world.is_defeated() {
//!         world.remove_entity(player);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod terrain;
pub mod physics;
pub mod simulation;
pub mod presentation;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec2, Vec3, Mat4, Transform},
            time::{TimeSource, Stopwatch, ManualTime},
        },
        assets::{ImageData, TextureHandle, TextureRegistry},
        terrain::{HeightfieldParams, HeightfieldTriangulator, TerrainMesh, TerrainError},
        physics::{CollisionWorld, Entity, EntityHandle, PlaneTriangle},
        simulation::{SimulationClock, Scene, InputState, Key},
        presentation::{DefeatOverlay, OverlayRect, FrameView},
        core::config::{ApplicationConfig, PhysicsConfig, TerrainConfig, PlayerConfig},
        config::{Config, ConfigError},
    };
}
