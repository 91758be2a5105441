//! Held-key state fed into the scene each frame

use std::collections::HashSet;

/// Keys the scene reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Rise by the jump lift every tick while held
    Jump,
    /// Leave the frame loop
    Quit,
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    /// No keys held
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Record a key press
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }
    
    /// Record a key release
    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }
    
    /// Set a key's state directly
    pub fn set(&mut self, key: Key, held: bool) {
        if held {
            self.press(key);
        } else {
            self.release(key);
        }
    }
    
    /// Whether `key` is currently held
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
