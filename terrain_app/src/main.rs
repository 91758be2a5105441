//! Headless terrain demo
//!
//! Loads `terrain_demo.toml` (or the stock settings), builds the terrain
//! from the configured heightmap and runs the frame loop for the configured
//! number of frames, logging when the defeat overlay appears. With
//! `engine.exit_on_defeat` set, the loop quits once the overlay is up.

use std::path::Path;
use std::time::Duration;

use terrain_engine::foundation::logging;
use terrain_engine::foundation::time::{Stopwatch, Timer};
use terrain_engine::prelude::*;
use terrain_engine::simulation::SceneError;
use thiserror::Error;

const CONFIG_PATH: &str = "terrain_demo.toml";

/// Jump is held for this many frames at the start of the run
const JUMP_FRAMES: u64 = 30;

#[derive(Error, Debug)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    
    #[error("scene setup failed: {0}")]
    Scene(#[from] SceneError),
}

/// Rolling hills along X, used when the heightmap file is missing
fn synthesized_heightmap() -> ImageData {
    ImageData::from_heights(16, 128, |x, y| {
        let along = (y as f32 / 9.0).sin() * 0.35;
        let across = (x as f32 / 5.0).cos() * 0.15;
        ((0.5 + along + across).clamp(0.0, 1.0) * 255.0) as u8
    })
}

fn load_heightmap(path: &str) -> ImageData {
    match ImageData::from_file(path) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("{}; using a synthesized heightmap", e);
            synthesized_heightmap()
        }
    }
}

/// Read the config file if present
///
/// Existence is checked here rather than through `load_or_default` so the
/// outcome can be logged once the configured log level is in place.
fn load_config(path: &str) -> Result<(ApplicationConfig, bool), AppError> {
    if Path::new(path).exists() {
        Ok((ApplicationConfig::load_from_file(path)?, true))
    } else {
        Ok((ApplicationConfig::default(), false))
    }
}

/// Whether the headless loop should raise `Key::Quit` after this frame
fn quit_requested(exit_on_defeat: bool, overlay_shown: bool) -> bool {
    exit_on_defeat && overlay_shown
}

fn run() -> Result<(), AppError> {
    let (config, from_file) = load_config(CONFIG_PATH)?;
    config.validate()?;
    
    logging::init_with_level(&config.engine.log_level);
    if from_file {
        log::info!("Loaded configuration from {}", CONFIG_PATH);
    } else {
        log::warn!("Config file {} not found, running with defaults", CONFIG_PATH);
    }
    
    let heightmap = load_heightmap(&config.terrain.heightmap_path);
    let frame_budget = config.engine.frame_budget;
    let exit_on_defeat = config.engine.exit_on_defeat;
    let frame_time = Duration::from_secs_f32(1.0 / config.engine.render_fps as f32);
    
    let mut scene = Scene::from_config(config, &heightmap, Stopwatch::start_new())?;
    log::info!(
        "Terrain: {} triangles, {} bytes of vertex data",
        scene.world().terrain().len(),
        scene.terrain_mesh().as_bytes().len()
    );
    
    let mut input = InputState::new();
    let mut timer = Timer::new();
    let mut overlay_shown = false;
    
    for frame in 0..frame_budget {
        input.set(Key::Jump, frame < JUMP_FRAMES);
        scene.frame(&input);
        
        let view = scene.frame_view();
        if view.overlay.is_some() && !overlay_shown {
            overlay_shown = true;
            log::info!("Frame {}: defeat overlay shown, player at {:?}", frame, scene.player_position());
        }
        log::trace!("Frame {}: eye {:?}", frame, view.camera_eye);
        timer.update();
        
        input.set(Key::Quit, quit_requested(exit_on_defeat, overlay_shown));
        if input.is_held(Key::Quit) {
            log::info!("Quitting after frame {}", frame);
            break;
        }
        std::thread::sleep(frame_time);
    }
    
    log::info!(
        "Ran {} frames at {:.1} fps, {} physics ticks, player at {:?}, defeated: {}",
        timer.frame_count(),
        timer.average_fps(),
        scene.world().tick_count(),
        scene.player_position(),
        scene.is_defeated()
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("terrain_demo failed: {}", e);
        eprintln!("terrain_demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_only_after_defeat_when_enabled() {
        assert!(!quit_requested(true, false));
        assert!(quit_requested(true, true));
        assert!(!quit_requested(false, true));
    }
    
    #[test]
    fn test_missing_config_uses_defaults() {
        let (config, from_file) = load_config("no/such/terrain_demo.toml").unwrap();
        assert!(!from_file);
        assert_eq!(config.engine.frame_budget, 600);
    }
    
    #[test]
    fn test_synthesized_heightmap_triangulates() {
        let image = synthesized_heightmap();
        let params = HeightfieldParams::new(Vec3::zeros(), Vec3::new(100.0, 5.0, 10.0), Vec2::new(10.0, 10.0));
        let field = HeightfieldTriangulator::triangulate(&image, &params).unwrap();
        assert_eq!(field.triangle_count(), 15 * 127 * 2);
    }
}
