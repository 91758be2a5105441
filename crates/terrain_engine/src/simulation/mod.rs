//! Frame-loop side of the simulation
//!
//! The [`SimulationClock`] decides when the collision world ticks, the
//! [`Scene`] wires the configured player, terrain and overlay together.

pub mod clock;
pub mod input;
pub mod scene;

pub use clock::SimulationClock;
pub use input::{InputState, Key};
pub use scene::Scene;

use thiserror::Error;

use crate::config::ConfigError;
use crate::terrain::TerrainError;

/// Scene setup errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Configuration failed validation
    #[error("Invalid scene configuration: {0}")]
    Config(#[from] ConfigError),
    
    /// Terrain could not be built
    #[error("Terrain build failed: {0}")]
    Terrain(#[from] TerrainError),
}
