//! Asset management system
//!
//! The collision core only needs decoded pixels for the heightmap and opaque
//! texture tokens to hand back to the renderer.

pub mod image_loader;
pub mod texture_registry;

pub use image_loader::ImageData;
pub use texture_registry::{TextureHandle, TextureRegistry};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Decoding or reading the file failed
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
    
    /// Pixel buffer size does not match the stated dimensions
    #[error("Invalid pixel buffer: expected {expected} bytes, got {actual}")]
    InvalidPixelBuffer {
        /// Bytes required by width * height * 4
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}
