//! Moving objects tracked by the collision world

use std::cmp::Ordering;

use crate::foundation::math::Vec3;

slotmap::new_key_type! {
    /// Stable handle to an entity inside a [`CollisionWorld`](super::CollisionWorld)
    pub struct EntityHandle;
}

/// Minimal moving-object state: a sphere with a per-tick movement
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    /// Current center of the collision sphere
    pub position: Vec3,
    previous_position: Vec3,
    /// Collision sphere radius, never negative
    pub radius: f32,
    /// Movement direction applied each tick, scaled by `speed`
    pub direction: Vec3,
    /// Distance per tick along `direction`
    pub speed: f32,
    /// Rise by the configured jump lift this tick
    pub jumping: bool,
    serial: u64,
}

impl Entity {
    /// Create a motionless entity; negative radii are clamped to zero
    pub fn new(name: impl Into<String>, position: Vec3, radius: f32) -> Self {
        Self {
            name: name.into(),
            position,
            previous_position: position,
            radius: radius.max(0.0),
            direction: Vec3::zeros(),
            speed: 0.0,
            jumping: false,
            serial: 0,
        }
    }
    
    /// Give the entity a per-tick movement
    pub fn with_movement(mut self, direction: Vec3, speed: f32) -> Self {
        self.direction = direction;
        self.speed = speed;
        self
    }
    
    /// Identifier used for deterministic tie-breaking
    pub fn name(&self) -> &str {
        &self.name
    }
    
    /// Position at the start of the current (or last) tick
    pub fn previous_position(&self) -> Vec3 {
        self.previous_position
    }
    
    /// Displacement contributed by this entity's own movement each tick
    pub fn movement(&self) -> Vec3 {
        self.direction * self.speed
    }
    
    /// Move to `position` and forget the old one, as if spawned there
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.previous_position = position;
    }
    
    pub(crate) fn snapshot(&mut self) {
        self.previous_position = self.position;
    }
    
    pub(crate) fn set_serial(&mut self, serial: u64) {
        self.serial = serial;
    }
    
    /// Total order on (name, spawn serial); the smaller entity is `first`
    /// in a pair resolution
    pub fn tie_break(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.serial.cmp(&other.serial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_starts_at_rest() {
        let entity = Entity::new("Rock", Vec3::new(1.0, 2.0, 3.0), -1.0);
        assert_eq!(entity.previous_position(), entity.position);
        assert_eq!(entity.movement(), Vec3::zeros());
        assert_eq!(entity.radius, 0.0);
    }
    
    #[test]
    fn test_tie_break_uses_name_then_serial() {
        let mut a = Entity::new("Alpha", Vec3::zeros(), 1.0);
        let mut b = Entity::new("Beta", Vec3::zeros(), 1.0);
        a.set_serial(9);
        b.set_serial(1);
        assert_eq!(a.tie_break(&b), Ordering::Less);
        
        let mut twin = Entity::new("Alpha", Vec3::zeros(), 1.0);
        twin.set_serial(3);
        assert_eq!(a.tie_break(&twin), Ordering::Greater);
    }
}
