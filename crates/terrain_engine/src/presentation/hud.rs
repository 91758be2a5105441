//! Heads-up overlay driven by the defeat flag

use crate::assets::{TextureHandle, TextureRegistry};
use crate::core::config::PresentationConfig;
use crate::foundation::math::Vec3;

/// Screen-space rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Tint
    pub color: Vec3,
    /// Image drawn into the rectangle, if any
    pub texture: Option<TextureHandle>,
}

/// The "game over" rectangle shown once the player is defeated
#[derive(Debug, Clone)]
pub struct DefeatOverlay {
    rect: OverlayRect,
}

impl DefeatOverlay {
    /// Wrap a fixed rectangle
    pub fn new(rect: OverlayRect) -> Self {
        Self { rect }
    }
    
    /// Build from the presentation settings, resolving the texture by name
    pub fn from_config(config: &PresentationConfig, textures: &TextureRegistry) -> Self {
        let [x, y, width, height] = config.defeat_rect;
        Self::new(OverlayRect {
            x,
            y,
            width,
            height,
            color: config.defeat_color,
            texture: textures.resolve(Some(config.defeat_texture.as_str())),
        })
    }
    
    /// The rectangle drawn while defeated
    pub fn rect(&self) -> &OverlayRect {
        &self.rect
    }
    
    /// Overlay to draw this frame
    pub fn overlay(&self, defeated: bool) -> Option<OverlayRect> {
        defeated.then_some(self.rect)
    }
}
