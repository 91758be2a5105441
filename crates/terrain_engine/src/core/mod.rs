//! # Core Engine Module
//!
//! Shared abstractions used by every subsystem. For now this is the typed
//! configuration tree; the loading trait itself lives in [`crate::config`].

pub mod config;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    PhysicsConfig,
    TerrainConfig,
    PlayerConfig,
    PresentationConfig,
    Config,
    ConfigError,
};
