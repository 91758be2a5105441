//! Specialized collection types

pub use slotmap::{Key, SlotMap};

/// Slot map that also remembers insertion order
///
/// Handles stay valid across removals of other items, and iteration always
/// follows the order in which the surviving items were inserted.
#[derive(Debug, Clone)]
pub struct OrderedSlotMap<K: Key, V> {
    slots: SlotMap<K, V>,
    order: Vec<K>,
}

impl<K: Key, V> OrderedSlotMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }
    
    /// Insert a value at the end of the order and return its handle
    pub fn insert(&mut self, value: V) -> K {
        let key = self.slots.insert(value);
        self.order.push(key);
        key
    }
    
    /// Remove a value; unknown or stale handles return `None`
    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.slots.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(value)
    }
    
    /// Get a value by handle
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key)
    }
    
    /// Get a mutable value by handle
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key)
    }
    
    /// Get mutable references to two distinct values at once
    pub fn get_pair_mut(&mut self, a: K, b: K) -> Option<(&mut V, &mut V)> {
        self.slots.get_disjoint_mut([a, b]).map(|[x, y]| (x, y))
    }
    
    /// Handles in insertion order
    pub fn keys(&self) -> &[K] {
        &self.order
    }
    
    /// Values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(move |k| self.slots.get(*k))
    }
    
    /// Mutable values in slot order, for passes where order does not matter
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.slots.values_mut()
    }
    
    /// Number of stored values
    pub fn len(&self) -> usize {
        self.order.len()
    }
    
    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: Key, V> Default for OrderedSlotMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
