//! Camera and skydome placement for a frame

use crate::assets::TextureHandle;
use crate::core::config::PresentationConfig;
use crate::foundation::math::{utils, Mat4, Point3, Transform, Vec3};
use super::hud::OverlayRect;

/// Added to the configured distance when pulling the camera back
const CAMERA_PULLBACK: f32 = 6.0;

/// Third-person camera trailing the player along a fixed direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    /// Configured distance; the eye sits `distance + 6` units back
    pub distance: f32,
    /// Facing direction, not necessarily unit length
    pub direction: Vec3,
}

impl FollowCamera {
    /// Camera from the presentation settings
    pub fn from_config(config: &PresentationConfig) -> Self {
        Self {
            distance: config.camera_distance,
            direction: config.camera_direction,
        }
    }
    
    /// Eye position for a player at `target`
    pub fn eye(&self, target: &Vec3) -> Vec3 {
        target - self.direction * (self.distance + CAMERA_PULLBACK)
    }
    
    /// Right-handed view matrix looking at `target` with +Y up
    pub fn view_matrix(&self, target: &Vec3) -> Mat4 {
        let eye = self.eye(target);
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(*target), &Vec3::y())
    }
}

/// Everything that changes per frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    /// World-to-camera matrix
    pub view: Mat4,
    /// Camera position
    pub camera_eye: Vec3,
    /// Skydome model transform
    pub skydome: Transform,
    /// Skydome texture
    pub skydome_texture: Option<TextureHandle>,
    /// HUD rectangle, present only while defeated
    pub overlay: Option<OverlayRect>,
}

impl FrameView {
    /// Assemble the view of a frame
    ///
    /// The skydome is centred on the player and spins about +Y by
    /// `elapsed_ms * skydome_spin_deg_per_ms` degrees.
    pub fn compute(
        player: &Vec3,
        elapsed_ms: f32,
        config: &PresentationConfig,
        skydome_texture: Option<TextureHandle>,
        overlay: Option<OverlayRect>,
    ) -> Self {
        let camera = FollowCamera::from_config(config);
        let spin = utils::deg_to_rad(elapsed_ms * config.skydome_spin_deg_per_ms);
        
        Self {
            view: camera.view_matrix(player),
            camera_eye: camera.eye(player),
            skydome: Transform::from_position(*player)
                .with_yaw(spin)
                .with_uniform_scale(config.skydome_scale),
            skydome_texture,
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureRegistry;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_trails_player() {
        let camera = FollowCamera::from_config(&PresentationConfig::default());
        let player = Vec3::new(-20.0, 4.0, -3.0);
        
        // distance 2 + 6 along (0, 0, 0.7)
        assert_relative_eq!(camera.eye(&player), Vec3::new(-20.0, 4.0, -8.6), epsilon = 1e-5);
        
        let view = camera.view_matrix(&player);
        let target_in_view = view.transform_point(&Point3::from(player));
        assert_relative_eq!(target_in_view.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(target_in_view.y, 0.0, epsilon = 1e-4);
        assert!(target_in_view.z < 0.0);
    }
    
    #[test]
    fn test_skydome_spins_around_player() {
        let config = PresentationConfig::default();
        let textures = TextureRegistry::with_defaults();
        let player = Vec3::new(1.0, 2.0, 3.0);
        
        // 18000 ms * 0.005 deg/ms = 90 degrees
        let skydome = textures.get(&config.skydome_texture);
        let frame = FrameView::compute(&player, 18_000.0, &config, skydome, None);
        assert_eq!(frame.skydome.position, player);
        assert_relative_eq!(frame.skydome.scale, Vec3::repeat(20.0));
        assert_relative_eq!(frame.skydome.rotation.angle(), std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
        assert_eq!(frame.skydome_texture, textures.get("skydome"));
        assert!(frame.skydome_texture.is_some());
        assert!(frame.overlay.is_none());
    }
}
