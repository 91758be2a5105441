//! Texture handles for the renderer side
//!
//! Geometry carries textures as opaque [`TextureHandle`] tokens. The registry
//! maps the names used in configuration to those tokens; what a handle means
//! (GPU image, file, nothing) is entirely up to the renderer.

use std::collections::HashMap;

/// Opaque texture token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// Names registered by [`TextureRegistry::with_defaults`]
pub const DEFAULT_TEXTURES: [&str; 5] = ["brick", "wood", "grass", "skydome", "game_over"];

/// Name to handle table
#[derive(Debug, Default, Clone)]
pub struct TextureRegistry {
    by_name: HashMap<String, TextureHandle>,
    names: Vec<String>,
}

impl TextureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Registry pre-populated with the scene's stock textures
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for name in DEFAULT_TEXTURES {
            registry.register(name);
        }
        registry
    }
    
    /// Register `name`, returning its existing handle if already known
    pub fn register(&mut self, name: &str) -> TextureHandle {
        if let Some(handle) = self.by_name.get(name) {
            return *handle;
        }
        
        let handle = TextureHandle(u32::try_from(self.names.len()).unwrap_or(u32::MAX));
        self.by_name.insert(name.to_string(), handle);
        self.names.push(name.to_string());
        log::debug!("Registered texture '{}' as {:?}", name, handle);
        handle
    }
    
    /// Look up a texture by name
    pub fn get(&self, name: &str) -> Option<TextureHandle> {
        self.by_name.get(name).copied()
    }
    
    /// Resolve an optional name; unknown names mean untextured
    pub fn resolve(&self, name: Option<&str>) -> Option<TextureHandle> {
        let name = name?;
        let handle = self.get(name);
        if handle.is_none() {
            log::warn!("Unknown texture '{}', rendering untextured", name);
        }
        handle
    }
    
    /// Name a handle was registered under
    pub fn name_of(&self, handle: TextureHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(String::as_str)
    }
    
    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.names.len()
    }
    
    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = TextureRegistry::new();
        let wood = registry.register("wood");
        assert_eq!(registry.register("wood"), wood);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.name_of(wood), Some("wood"));
    }
    
    #[test]
    fn test_defaults_and_unknown_names() {
        let registry = TextureRegistry::with_defaults();
        assert_eq!(registry.len(), DEFAULT_TEXTURES.len());
        assert!(registry.resolve(Some("game_over")).is_some());
        assert_eq!(registry.resolve(Some("lava")), None);
        assert_eq!(registry.resolve(None), None);
    }
}
