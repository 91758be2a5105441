//! # Unified Configuration System
//!
//! All tunables of the demo in one serializable tree. Defaults reproduce the
//! constants the game shipped with, so an empty or missing config file gives
//! the stock scene.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Logging and the headless frame loop
//! - **Physics Config**: Tick rate, gravity and jump lift
//! - **Terrain Config**: Heightmap source and the box it is stretched over
//! - **Player Config**: Spawn state of the controlled entity
//! - **Presentation Config**: Camera, skydome and defeat overlay

use serde::{Serialize, Deserialize};

use crate::foundation::math::{Vec2, Vec3};

// Re-export from the loader module for compatibility
pub use crate::config::{Config, ConfigError};

fn require_finite(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be finite"))
    }
}

fn require_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

/// # Engine Configuration
///
/// Logging and frame-loop settings for the demo driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Render frames the headless demo runs before exiting
    pub frame_budget: u64,
    /// Render frames per second the headless demo paces itself to
    pub render_fps: u32,
    /// Quit the headless demo once the defeat overlay has been shown
    pub exit_on_defeat: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            frame_budget: 600,
            render_fps: 120,
            exit_on_defeat: true,
        }
    }
    
    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_fps == 0 {
            return Err(ConfigError::invalid("engine.render_fps", "must be at least 1"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Physics Configuration
///
/// Per-tick constants. Gravity and jump are positional deltas applied once
/// per tick, not accelerations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Simulation ticks per second
    pub tick_rate: f32,
    /// Downward Y displacement applied to every entity each tick
    pub gravity_per_tick: f32,
    /// Upward Y displacement applied to a jumping entity each tick
    pub jump_lift_per_tick: f32,
}

impl PhysicsConfig {
    /// Create a new physics configuration
    pub fn new() -> Self {
        Self {
            tick_rate: 60.0,
            gravity_per_tick: 0.10,
            jump_lift_per_tick: 0.20,
        }
    }
    
    /// Set the tick rate
    pub fn with_tick_rate(mut self, rate: f32) -> Self {
        self.tick_rate = rate;
        self
    }
    
    /// Set the per-tick gravity displacement
    pub fn with_gravity(mut self, gravity_per_tick: f32) -> Self {
        self.gravity_per_tick = gravity_per_tick;
        self
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("physics.tick_rate", self.tick_rate)?;
        require_finite("physics.gravity_per_tick", self.gravity_per_tick)?;
        require_finite("physics.jump_lift_per_tick", self.jump_lift_per_tick)?;
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Terrain Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grayscale heightmap image; only the red channel is read
    pub heightmap_path: String,
    /// Center of the terrain box in world space
    pub center: Vec3,
    /// Size of the terrain box along X, Y and Z
    pub extent: Vec3,
    /// UV repeat count across the whole terrain
    pub uv_tiling: Vec2,
    /// Texture registry name, `None` for untextured terrain
    pub texture: Option<String>,
}

impl TerrainConfig {
    /// Create a new terrain configuration
    pub fn new() -> Self {
        Self {
            heightmap_path: "resources/Teren.png".to_string(),
            center: Vec3::new(0.0, -1.0, 0.0),
            extent: Vec3::new(100.0, 5.0, 10.0),
            uv_tiling: Vec2::new(10.0, 10.0),
            texture: Some("wood".to_string()),
        }
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("terrain.extent.x", self.extent.x)?;
        if !self.extent.y.is_finite() || self.extent.y < 0.0 {
            return Err(ConfigError::invalid("terrain.extent.y", "must be finite and non-negative"));
        }
        require_positive("terrain.extent.z", self.extent.z)?;
        for value in self.center.iter() {
            require_finite("terrain.center", *value)?;
        }
        if self.uv_tiling.iter().any(|uv| !uv.is_finite() || *uv < 0.0) {
            return Err(ConfigError::invalid("terrain.uv_tiling", "must be finite and non-negative"));
        }
        Ok(())
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Player Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Identifier used for collision tie-breaking
    pub name: String,
    /// Spawn position
    pub spawn: Vec3,
    /// Movement direction, scaled by `speed` each tick
    pub direction: Vec3,
    /// Distance covered per tick along `direction`
    pub speed: f32,
    /// Collision sphere radius
    pub radius: f32,
}

impl PlayerConfig {
    /// Create a new player configuration
    pub fn new() -> Self {
        Self {
            name: "Player".to_string(),
            spawn: Vec3::new(-20.0, 4.0, -3.0),
            direction: Vec3::new(0.7, 0.0, 0.0),
            speed: 0.15,
            radius: 0.1,
        }
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::invalid("player.name", "cannot be empty"));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ConfigError::invalid("player.radius", "must be finite and non-negative"));
        }
        require_finite("player.speed", self.speed)?;
        Ok(())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Presentation Configuration
///
/// Values consumed by the renderer side: camera follow distance, skydome
/// animation and the defeat overlay rectangle in screen pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Base distance of the follow camera behind the player
    pub camera_distance: f32,
    /// Direction the follow camera looks along
    pub camera_direction: Vec3,
    /// Uniform scale of the skydome mesh
    pub skydome_scale: f32,
    /// Skydome spin in degrees per elapsed millisecond
    pub skydome_spin_deg_per_ms: f32,
    /// Skydome texture registry name
    pub skydome_texture: String,
    /// Defeat overlay rectangle: x, y, width, height in pixels
    pub defeat_rect: [f32; 4],
    /// Defeat overlay tint
    pub defeat_color: Vec3,
    /// Defeat overlay texture registry name
    pub defeat_texture: String,
}

impl PresentationConfig {
    /// Create a new presentation configuration
    pub fn new() -> Self {
        Self {
            camera_distance: 2.0,
            camera_direction: Vec3::new(0.0, 0.0, 0.7),
            skydome_scale: 20.0,
            skydome_spin_deg_per_ms: 0.005,
            skydome_texture: "skydome".to_string(),
            defeat_rect: [300.0, 100.0, 1100.0, 800.0],
            defeat_color: Vec3::new(1.0, 1.0, 1.0),
            defeat_texture: "game_over".to_string(),
        }
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("presentation.camera_distance", self.camera_distance)?;
        if self.camera_direction.norm_squared() <= f32::EPSILON {
            return Err(ConfigError::invalid("presentation.camera_direction", "cannot be zero"));
        }
        require_positive("presentation.skydome_scale", self.skydome_scale)?;
        if self.defeat_rect[2] < 0.0 || self.defeat_rect[3] < 0.0 {
            return Err(ConfigError::invalid("presentation.defeat_rect", "size cannot be negative"));
        }
        Ok(())
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
/// This is the main configuration structure applications should use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Simulation constants
    pub physics: PhysicsConfig,
    /// Terrain source
    pub terrain: TerrainConfig,
    /// Controlled entity
    pub player: PlayerConfig,
    /// Renderer-facing values
    pub presentation: PresentationConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.physics.validate()?;
        self.terrain.validate()?;
        self.player.validate()?;
        self.presentation.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}
