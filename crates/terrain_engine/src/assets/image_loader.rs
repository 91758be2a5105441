//! Image loading utilities for heightmap data
//!
//! Decodes PNG files into tightly packed RGBA8 so the terrain code can sample
//! any channel without caring about the source format.

use std::path::Path;
use crate::assets::AssetError;

/// Decoded image data in RGBA8 layout, rows top to bottom
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        
        log::debug!("Loading image from: {:?}", path_ref);
        
        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image {}: {}", path_ref.display(), e)))?;
        
        // Grayscale and RGB sources both end up as RGBA8
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        
        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);
        
        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        })
    }
    
    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;
        
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        
        log::debug!("Loaded image {}x{} from memory", width, height);
        
        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        })
    }
    
    /// Wrap an existing RGBA8 buffer
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(AssetError::InvalidPixelBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels: 4,
        })
    }
    
    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_fn(width, height, |_, _| color)
    }
    
    /// Build an image by evaluating `pixel(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut pixel: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&pixel(x, y));
            }
        }
        
        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }
    
    /// Grayscale image from a height value per pixel (stored in R, G and B)
    pub fn from_heights(width: u32, height: u32, mut value: impl FnMut(u32, u32) -> u8) -> Self {
        Self::from_fn(width, height, |x, y| {
            let v = value(x, y);
            [v, v, v, 255]
        })
    }
    
    /// Red channel of the pixel at column `x`, row `y`
    ///
    /// Out-of-range coordinates read as 0.
    pub fn red(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let index = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        self.data.get(index).copied().unwrap_or(0)
    }
    
    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
