//! Fixed-step gate between the render loop and the physics tick

use crate::foundation::time::TimeSource;
use crate::physics::{CollisionWorld, TickSummary};

/// Elapsed intervals after which a single frame is reported as a stall
const STALL_INTERVALS: f64 = 4.0;

/// Throttles simulation ticks to a target rate
///
/// Each render frame calls [`SimulationClock::run_frame`]. At most one tick
/// runs per frame; when it does, the last-tick marker jumps to the current
/// time. A slow renderer therefore slows the simulation down instead of
/// making it catch up with several ticks at once.
#[derive(Debug)]
pub struct SimulationClock<T: TimeSource> {
    time: T,
    interval: f64,
    last_tick: f64,
    ticks: u64,
}

impl<T: TimeSource> SimulationClock<T> {
    /// Create a clock ticking `rate` times per second
    ///
    /// The last-tick marker starts at the source's current time. A rate that
    /// is not positive never ticks.
    pub fn new(time: T, rate: f32) -> Self {
        let interval = if rate > 0.0 { 1.0 / f64::from(rate) } else { f64::INFINITY };
        let last_tick = time.elapsed_secs();
        Self {
            time,
            interval,
            last_tick,
            ticks: 0,
        }
    }
    
    /// Seconds between ticks
    pub fn interval(&self) -> f64 {
        self.interval
    }
    
    /// Ticks granted so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
    
    /// The underlying time source
    pub fn time(&self) -> &T {
        &self.time
    }
    
    /// Check whether a tick is due and, if so, consume it
    pub fn advance(&mut self) -> bool {
        let now = self.time.elapsed_secs();
        let elapsed = now - self.last_tick;
        if elapsed < self.interval {
            return false;
        }
        
        if elapsed >= self.interval * STALL_INTERVALS {
            log::debug!(
                "Simulation stalled for {:.1} ms ({:.1} tick intervals)",
                elapsed * 1000.0,
                elapsed / self.interval
            );
        }
        
        self.last_tick = now;
        self.ticks += 1;
        true
    }
    
    /// Run one world tick if due
    pub fn run_frame(&mut self, world: &mut CollisionWorld) -> Option<TickSummary> {
        self.advance().then(|| world.tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PhysicsConfig;
    use crate::foundation::time::ManualTime;

    const RATE: f64 = 60.0;

    #[test]
    fn test_one_tick_per_frame_without_catch_up() {
        let time = ManualTime::new();
        let mut clock = SimulationClock::new(&time, RATE as f32);
        let mut world = CollisionWorld::new(PhysicsConfig::default());
        
        time.set(2.0 / RATE);
        assert!(clock.run_frame(&mut world).is_some());
        for _ in 0..10 {
            assert!(clock.run_frame(&mut world).is_none());
        }
        assert_eq!(world.tick_count(), 1);
        assert_eq!(clock.tick_count(), 1);
    }
    
    #[test]
    fn test_ticks_resume_after_interval() {
        let time = ManualTime::new();
        let mut clock = SimulationClock::new(&time, RATE as f32);
        
        time.advance(0.5 / RATE);
        assert!(!clock.advance());
        time.advance(0.6 / RATE);
        assert!(clock.advance());
        
        // Marker moved to the tick time, so another full interval is needed
        time.advance(0.9 / RATE);
        assert!(!clock.advance());
        time.advance(0.2 / RATE);
        assert!(clock.advance());
    }
    
    #[test]
    fn test_marker_starts_at_construction_time() {
        let time = ManualTime::new();
        time.set(100.0);
        let mut clock = SimulationClock::new(&time, RATE as f32);
        assert!(!clock.advance());
        
        time.set(100.0 + 1.5 / RATE);
        assert!(clock.advance());
    }
    
    #[test]
    fn test_gating_holds_after_long_uptime() {
        let time = ManualTime::new();
        time.set(30.0 * 24.0 * 3600.0);
        let mut clock = SimulationClock::new(&time, RATE as f32);
        
        time.advance(0.5 / RATE);
        assert!(!clock.advance());
        time.advance(0.6 / RATE);
        assert!(clock.advance());
        time.advance(0.9 / RATE);
        assert!(!clock.advance());
    }
    
    #[test]
    fn test_non_positive_rate_never_ticks() {
        let time = ManualTime::new();
        let mut clock = SimulationClock::new(&time, 0.0);
        time.set(1.0e6);
        assert!(!clock.advance());
    }
}
