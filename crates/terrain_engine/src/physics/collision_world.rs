//! The collision world: dynamic spheres against each other and the terrain
//!
//! One [`CollisionWorld::tick`] runs these steps in order:
//!
//! 1. Snapshot every entity's position as its previous position
//! 2. Apply each entity's own movement (and jump lift)
//! 3. Separate overlapping entity pairs
//! 4. Apply gravity once per entity
//! 5. Push entities out of terrain triangles, raising the defeat flag
//!
//! Step 3 mutates positions while it walks the pairs, so later pairs see the
//! corrections of earlier ones; it must stay sequential.

use std::cmp::Ordering;

use crate::assets::ImageData;
use crate::core::config::PhysicsConfig;
use crate::foundation::collections::OrderedSlotMap;
use crate::terrain::{HeightfieldParams, HeightfieldTriangulator, TerrainError, TerrainMesh};
use super::collision::PlaneTriangle;
use super::entity::{Entity, EntityHandle};

/// Counts from one tick, mostly for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Overlapping entity pairs that were pushed apart
    pub entity_contacts: usize,
    /// Entity/triangle contacts that pushed an entity out of the terrain
    pub terrain_contacts: usize,
}

/// Owner of all entities, the static terrain and the defeat flag
pub struct CollisionWorld {
    config: PhysicsConfig,
    entities: OrderedSlotMap<EntityHandle, Entity>,
    terrain: Vec<PlaneTriangle>,
    terrain_built: bool,
    terrain_mesh: Option<TerrainMesh>,
    defeated: bool,
    next_serial: u64,
    tick_count: u64,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            entities: OrderedSlotMap::new(),
            terrain: Vec::new(),
            terrain_built: false,
            terrain_mesh: None,
            defeated: false,
            next_serial: 0,
            tick_count: 0,
        }
    }
    
    /// Create a world whose terrain is an explicit triangle list
    pub fn with_terrain(config: PhysicsConfig, terrain: Vec<PlaneTriangle>) -> Self {
        let mut world = Self::new(config);
        world.terrain = terrain;
        world.terrain_built = true;
        world
    }
    
    /// Physics constants this world ticks with
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }
    
    /// Triangulate a heightmap into this world's terrain
    ///
    /// Returns the number of collider triangles. Allowed once per world; on
    /// any error nothing is committed. The matching render mesh is kept for
    /// [`CollisionWorld::take_terrain_mesh`].
    pub fn build_terrain(&mut self, image: &ImageData, params: &HeightfieldParams) -> Result<usize, TerrainError> {
        if self.terrain_built {
            return Err(TerrainError::AlreadyBuilt);
        }
        
        let heightfield = HeightfieldTriangulator::triangulate(image, params)?;
        let count = heightfield.triangle_count();
        
        self.terrain = heightfield.colliders;
        self.terrain_mesh = Some(heightfield.mesh);
        self.terrain_built = true;
        
        log::info!(
            "Built terrain: {} triangles from {}x{} heightmap, center {:?}, extent {:?}",
            count,
            image.width,
            image.height,
            params.center,
            params.extent
        );
        Ok(count)
    }
    
    /// Static terrain colliders in triangulation order
    pub fn terrain(&self) -> &[PlaneTriangle] {
        &self.terrain
    }
    
    /// Hand the render mesh built by [`CollisionWorld::build_terrain`] to the presentation side
    pub fn take_terrain_mesh(&mut self) -> Option<TerrainMesh> {
        self.terrain_mesh.take()
    }
    
    /// Add an entity at the end of the resolution order
    pub fn add_entity(&mut self, mut entity: Entity) -> EntityHandle {
        entity.set_serial(self.next_serial);
        self.next_serial += 1;
        
        log::debug!("Adding entity '{}' at {:?}", entity.name(), entity.position);
        self.entities.insert(entity)
    }
    
    /// Remove an entity; unknown or already removed handles are ignored
    pub fn remove_entity(&mut self, handle: EntityHandle) -> Option<Entity> {
        let removed = self.entities.remove(handle);
        if let Some(entity) = &removed {
            log::debug!("Removed entity '{}'", entity.name());
        }
        removed
    }
    
    /// Look up an entity
    pub fn entity(&self, handle: EntityHandle) -> Option<&Entity> {
        self.entities.get(handle)
    }
    
    /// Look up an entity for modification between ticks
    pub fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.entities.get_mut(handle)
    }
    
    /// Entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
    
    /// Handles in insertion order
    pub fn handles(&self) -> &[EntityHandle] {
        self.entities.keys()
    }
    
    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
    
    /// Whether any entity has ever penetrated the terrain
    pub fn is_defeated(&self) -> bool {
        self.defeated
    }
    
    /// Clear the defeat flag; only scene reset logic calls this
    pub fn reset_defeat(&mut self) {
        self.defeated = false;
    }
    
    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
    
    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickSummary {
        for entity in self.entities.values_mut() {
            entity.snapshot();
        }
        
        self.apply_movement();
        let entity_contacts = self.resolve_entity_pairs();
        self.apply_gravity();
        let terrain_contacts = self.resolve_terrain();
        
        self.tick_count += 1;
        
        let summary = TickSummary {
            entity_contacts,
            terrain_contacts,
        };
        if summary != TickSummary::default() {
            log::trace!("Tick {}: {:?}", self.tick_count, summary);
        }
        summary
    }
    
    fn apply_movement(&mut self) {
        let lift = self.config.jump_lift_per_tick;
        for entity in self.entities.values_mut() {
            entity.position += entity.movement();
            if entity.jumping {
                entity.position.y += lift;
            }
        }
    }
    
    /// Push overlapping spheres apart
    ///
    /// Each unordered pair is visited once in insertion order. Within a pair
    /// the entity that sorts first by (name, serial) is `first`, so the
    /// outcome does not depend on which one was added first. The separation
    /// vector is `first - second` unnormalized and each side moves by half of
    /// it scaled by the center distance.
    fn resolve_entity_pairs(&mut self) -> usize {
        let order = self.entities.keys().to_vec();
        let mut contacts = 0;
        
        for (index, &handle_a) in order.iter().enumerate() {
            for &handle_b in &order[index + 1..] {
                let Some((a, b)) = self.entities.get_pair_mut(handle_a, handle_b) else {
                    continue;
                };
                let (first, second) = match a.tie_break(b) {
                    Ordering::Greater => (b, a),
                    _ => (a, b),
                };
                
                let v = first.position - second.position;
                let d = v.norm();
                if d < first.radius + second.radius {
                    let shift = v * (d / 2.0);
                    first.position += shift;
                    second.position -= shift;
                    contacts += 1;
                }
            }
        }
        
        contacts
    }
    
    fn apply_gravity(&mut self) {
        let gravity = self.config.gravity_per_tick;
        for entity in self.entities.values_mut() {
            entity.position.y -= gravity;
        }
    }
    
    /// Push entities out of terrain triangles they touch or crossed
    ///
    /// Triangles are tested in order against the entity's already corrected
    /// position, so one push can clear later candidates.
    fn resolve_terrain(&mut self) -> usize {
        let mut contacts = 0;
        let mut first_hit: Option<String> = None;
        
        for entity in self.entities.values_mut() {
            let previous = entity.previous_position();
            for triangle in &self.terrain {
                if let Some(push) = triangle.sphere_contact(&entity.position, &previous, entity.radius) {
                    entity.position += push;
                    contacts += 1;
                    if first_hit.is_none() {
                        first_hit = Some(entity.name().to_string());
                    }
                }
            }
        }
        
        if let Some(name) = first_hit {
            if !self.defeated {
                log::info!("Entity '{}' penetrated the terrain on tick {}, defeat raised", name, self.tick_count + 1);
            }
            self.defeated = true;
        }
        contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec2, Vec3};
    use approx::assert_relative_eq;

    fn no_gravity() -> PhysicsConfig {
        PhysicsConfig::default().with_gravity(0.0)
    }

    #[test]
    fn test_add_and_remove_entities() {
        let mut world = CollisionWorld::new(PhysicsConfig::default());
        let a = world.add_entity(Entity::new("A", Vec3::zeros(), 1.0));
        let b = world.add_entity(Entity::new("B", Vec3::zeros(), 1.0));
        assert_eq!(world.entity_count(), 2);
        assert_eq!(world.handles(), &[a, b]);
        
        assert!(world.remove_entity(a).is_some());
        assert!(world.remove_entity(a).is_none());
        assert_eq!(world.handles(), &[b]);
        assert!(world.entity(a).is_none());
    }
    
    #[test]
    fn test_gravity_without_contacts() {
        let mut world = CollisionWorld::new(PhysicsConfig::default());
        let a = world.add_entity(Entity::new("A", Vec3::new(0.0, 10.0, 0.0), 0.5));
        let b = world.add_entity(Entity::new("B", Vec3::new(5.0, 10.0, 0.0), 0.5));
        
        let summary = world.tick();
        assert_eq!(summary, TickSummary::default());
        assert_relative_eq!(world.entity(a).unwrap().position, Vec3::new(0.0, 9.9, 0.0), epsilon = 1e-6);
        assert_relative_eq!(world.entity(b).unwrap().position, Vec3::new(5.0, 9.9, 0.0), epsilon = 1e-6);
        assert_eq!(world.entity(a).unwrap().previous_position(), Vec3::new(0.0, 10.0, 0.0));
    }
    
    #[test]
    fn test_movement_and_jump_lift() {
        let mut world = CollisionWorld::new(PhysicsConfig::default());
        let mut player = Entity::new("Player", Vec3::zeros(), 0.1).with_movement(Vec3::new(0.7, 0.0, 0.0), 0.15);
        player.jumping = true;
        let handle = world.add_entity(player);
        
        world.tick();
        let position = world.entity(handle).unwrap().position;
        assert_relative_eq!(position, Vec3::new(0.105, 0.10, 0.0), epsilon = 1e-6);
    }
    
    #[test]
    fn test_pair_push_uses_distance_scaled_vector() {
        let mut world = CollisionWorld::new(no_gravity());
        let a = world.add_entity(Entity::new("A", Vec3::new(0.0, 0.0, 0.0), 1.0));
        let b = world.add_entity(Entity::new("B", Vec3::new(1.0, 0.0, 0.0), 1.0));
        
        let summary = world.tick();
        assert_eq!(summary.entity_contacts, 1);
        
        // v = A - B = (-1, 0, 0), d = 1, each side moves by v * 0.5
        assert_relative_eq!(world.entity(a).unwrap().position, Vec3::new(-0.5, 0.0, 0.0));
        assert_relative_eq!(world.entity(b).unwrap().position, Vec3::new(1.5, 0.0, 0.0));
    }
    
    #[test]
    fn test_touching_spheres_do_not_overlap() {
        let mut world = CollisionWorld::new(no_gravity());
        world.add_entity(Entity::new("A", Vec3::new(0.0, 0.0, 0.0), 1.0));
        world.add_entity(Entity::new("B", Vec3::new(2.0, 0.0, 0.0), 1.0));
        assert_eq!(world.tick().entity_contacts, 0);
    }
    
    #[test]
    fn test_build_terrain_once() {
        let mut world = CollisionWorld::new(PhysicsConfig::default());
        let image = ImageData::solid_color(3, 3, [0, 0, 0, 255]);
        let params = HeightfieldParams::new(Vec3::zeros(), Vec3::new(4.0, 1.0, 4.0), Vec2::new(1.0, 1.0));
        
        assert_eq!(world.build_terrain(&image, &params).unwrap(), 8);
        assert_eq!(world.terrain().len(), 8);
        assert!(matches!(world.build_terrain(&image, &params), Err(TerrainError::AlreadyBuilt)));
        assert_eq!(world.terrain().len(), 8);
        
        let mesh = world.take_terrain_mesh().unwrap();
        assert_eq!(mesh.triangle_count(), 8);
        assert!(world.take_terrain_mesh().is_none());
    }
    
    #[test]
    fn test_failed_build_commits_nothing() {
        let mut world = CollisionWorld::new(PhysicsConfig::default());
        let tiny = ImageData::solid_color(1, 1, [0, 0, 0, 255]);
        let params = HeightfieldParams::new(Vec3::zeros(), Vec3::new(4.0, 1.0, 4.0), Vec2::new(1.0, 1.0));
        
        assert!(world.build_terrain(&tiny, &params).is_err());
        assert!(world.terrain().is_empty());
        
        // A failed attempt does not use up the one build
        let image = ImageData::solid_color(2, 2, [0, 0, 0, 255]);
        assert_eq!(world.build_terrain(&image, &params).unwrap(), 2);
    }
}
