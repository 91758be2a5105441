//! The demo scene: one player over a heightmap terrain

use crate::assets::{ImageData, TextureHandle, TextureRegistry};
use crate::core::config::ApplicationConfig;
use crate::foundation::math::Vec3;
use crate::foundation::time::TimeSource;
use crate::physics::{CollisionWorld, Entity, EntityHandle};
use crate::presentation::{DefeatOverlay, FrameView};
use crate::terrain::{HeightfieldParams, TerrainMesh};
use super::clock::SimulationClock;
use super::input::{InputState, Key};
use super::SceneError;

/// Player, terrain, clock and overlay wired from one configuration
pub struct Scene<T: TimeSource> {
    config: ApplicationConfig,
    textures: TextureRegistry,
    world: CollisionWorld,
    player: EntityHandle,
    clock: SimulationClock<T>,
    terrain_mesh: TerrainMesh,
    skydome_texture: Option<TextureHandle>,
    overlay: DefeatOverlay,
}

impl<T: TimeSource> Scene<T> {
    /// Validate `config`, build the terrain from `heightmap` and spawn the player
    pub fn from_config(config: ApplicationConfig, heightmap: &ImageData, time: T) -> Result<Self, SceneError> {
        config.validate()?;
        
        let textures = TextureRegistry::with_defaults();
        let mut world = CollisionWorld::new(config.physics);
        
        let params = HeightfieldParams::new(config.terrain.center, config.terrain.extent, config.terrain.uv_tiling)
            .with_texture(textures.resolve(config.terrain.texture.as_deref()));
        world.build_terrain(heightmap, &params)?;
        let terrain_mesh = world.take_terrain_mesh().unwrap_or_default();
        
        let player = world.add_entity(Self::spawn_player(&config));
        let clock = SimulationClock::new(time, config.physics.tick_rate);
        let skydome_texture = textures.resolve(Some(config.presentation.skydome_texture.as_str()));
        let overlay = DefeatOverlay::from_config(&config.presentation, &textures);
        
        log::info!(
            "Scene ready: player '{}' at {:?}, ticking at {} Hz",
            config.player.name,
            config.player.spawn,
            config.physics.tick_rate
        );
        
        Ok(Self {
            config,
            textures,
            world,
            player,
            clock,
            terrain_mesh,
            skydome_texture,
            overlay,
        })
    }
    
    fn spawn_player(config: &ApplicationConfig) -> Entity {
        let player = &config.player;
        Entity::new(player.name.clone(), player.spawn, player.radius).with_movement(player.direction, player.speed)
    }
    
    /// Feed this frame's input and tick the world if the clock allows
    ///
    /// Returns whether a tick ran.
    pub fn frame(&mut self, input: &InputState) -> bool {
        if let Some(player) = self.world.entity_mut(self.player) {
            player.jumping = input.is_held(Key::Jump);
        }
        self.clock.run_frame(&mut self.world).is_some()
    }
    
    /// Put the player back at its spawn point and clear the defeat flag
    pub fn reset(&mut self) {
        let spawn = self.config.player.spawn;
        if let Some(player) = self.world.entity_mut(self.player) {
            player.teleport(spawn);
            player.jumping = false;
        }
        self.world.reset_defeat();
        log::info!("Scene reset, player back at {:?}", spawn);
    }
    
    /// Camera, skydome and HUD state for the current frame
    pub fn frame_view(&self) -> FrameView {
        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = (self.clock.time().elapsed_secs() * 1000.0) as f32;
        FrameView::compute(
            &self.player_position(),
            elapsed_ms,
            &self.config.presentation,
            self.skydome_texture,
            self.overlay.overlay(self.world.is_defeated()),
        )
    }
    
    /// Current player position
    pub fn player_position(&self) -> Vec3 {
        self.world
            .entity(self.player)
            .map_or(self.config.player.spawn, |player| player.position)
    }
    
    /// Handle of the controlled entity
    pub fn player(&self) -> EntityHandle {
        self.player
    }
    
    /// Whether the HUD should show the defeat overlay
    pub fn is_defeated(&self) -> bool {
        self.world.is_defeated()
    }
    
    /// The collision world
    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }
    
    /// The collision world, for adding or removing entities between frames
    pub fn world_mut(&mut self) -> &mut CollisionWorld {
        &mut self.world
    }
    
    /// Render geometry of the terrain
    pub fn terrain_mesh(&self) -> &TerrainMesh {
        &self.terrain_mesh
    }
    
    /// Texture names known to the scene
    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }
    
    /// The configuration the scene was built from
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::foundation::time::ManualTime;
    use crate::terrain::texture_batches;
    use approx::assert_relative_eq;

    /// Flat 10x10 floor at y = 0 under a player resting just above it
    fn floor_config() -> ApplicationConfig {
        let mut config = ApplicationConfig::default();
        config.terrain.center = Vec3::zeros();
        config.terrain.extent = Vec3::new(10.0, 0.0, 10.0);
        config.terrain.uv_tiling = Vec2::new(1.0, 1.0);
        config.player.spawn = Vec3::new(1.0, 3.0, -2.0);
        config.player.speed = 0.0;
        config.player.radius = 0.5;
        config
    }

    fn floor_image() -> ImageData {
        ImageData::solid_color(2, 2, [0, 0, 0, 255])
    }

    #[test]
    fn test_scene_builds_terrain_and_player() {
        let time = ManualTime::new();
        let scene = Scene::from_config(floor_config(), &floor_image(), &time).unwrap();
        
        assert_eq!(scene.world().terrain().len(), 2);
        assert_eq!(scene.terrain_mesh().triangle_count(), 2);
        assert_eq!(scene.world().entity_count(), 1);
        assert_eq!(scene.player_position(), Vec3::new(1.0, 3.0, -2.0));
        
        let batches = texture_batches(scene.world().terrain());
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].texture, scene.textures().get("wood"));
    }
    
    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = floor_config();
        config.physics.tick_rate = 0.0;
        let time = ManualTime::new();
        assert!(matches!(
            Scene::from_config(config, &floor_image(), &time),
            Err(SceneError::Config(_))
        ));
    }
    
    #[test]
    fn test_jump_input_lifts_player() {
        let time = ManualTime::new();
        let mut scene = Scene::from_config(floor_config(), &floor_image(), &time).unwrap();
        let mut input = InputState::new();
        input.press(Key::Jump);
        
        time.advance(1.0 / 60.0);
        assert!(scene.frame(&input));
        // +0.20 lift, -0.10 gravity
        assert_relative_eq!(scene.player_position().y, 3.1, epsilon = 1e-5);
        
        // No time passed, no tick
        assert!(!scene.frame(&input));
        assert_relative_eq!(scene.player_position().y, 3.1, epsilon = 1e-5);
    }
    
    #[test]
    fn test_falling_player_is_defeated_and_reset() {
        let time = ManualTime::new();
        let mut scene = Scene::from_config(floor_config(), &floor_image(), &time).unwrap();
        let input = InputState::new();
        
        for _ in 0..40 {
            time.advance(1.0 / 30.0);
            scene.frame(&input);
        }
        assert!(scene.is_defeated());
        assert!(scene.frame_view().overlay.is_some());
        // Resting on the floor one radius up
        assert_relative_eq!(scene.player_position().y, 0.5, epsilon = 1e-4);
        
        scene.reset();
        assert!(!scene.is_defeated());
        assert_eq!(scene.player_position(), Vec3::new(1.0, 3.0, -2.0));
        assert!(scene.frame_view().overlay.is_none());
    }
}
