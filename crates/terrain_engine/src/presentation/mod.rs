//! What a renderer needs to draw one frame
//!
//! Nothing here talks to a graphics API. The scene hands out plain values
//! (matrices, transforms, overlay rectangles) and the binary decides what to
//! do with them.

pub mod hud;
pub mod view;

pub use hud::{DefeatOverlay, OverlayRect};
pub use view::{FollowCamera, FrameView};
