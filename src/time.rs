//! Tick timing for the update loop.
//!
//! [`TickTimer`] is the scheduler's source of elapsed-time truth: it
//! records the reference time of the last completed tick and hands the
//! delta to the spawn-accounting math. An optional fixed delta replaces
//! wall-clock measurement for deterministic simulation in tests.

use std::time::Instant;

/// Tracks time between scheduler ticks.
#[derive(Debug)]
pub struct TickTimer {
    /// When the timer was created or last reset.
    start: Instant,
    /// Reference time of the last completed tick.
    last_tick: Instant,
    /// Delta produced by the most recent [`TickTimer::update`].
    delta_secs: f32,
    /// Ticks since start.
    tick_count: u64,
    /// Fixed delta for deterministic updates (overrides wall clock).
    fixed_delta: Option<f32>,
}

impl TickTimer {
    /// Create a timer starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            delta_secs: 0.0,
            tick_count: 0,
            fixed_delta: None,
        }
    }

    /// Advance to a new tick and return the elapsed seconds since the
    /// previous one.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw);
        self.last_tick = now;
        self.tick_count += 1;
        self.delta_secs
    }

    /// Seconds between the two most recent ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Seconds since the timer was created or reset.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Ticks since start.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Use a fixed delta instead of the wall clock.
    ///
    /// Pass `None` to return to real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Reset to the initial state, keeping any fixed delta.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
        self.delta_secs = 0.0;
        self.tick_count = 0;
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_timer_new() {
        let timer = TickTimer::new();
        assert_eq!(timer.ticks(), 0);
        assert_eq!(timer.delta(), 0.0);
    }

    #[test]
    fn test_update_measures_elapsed() {
        let mut timer = TickTimer::new();
        thread::sleep(Duration::from_millis(10));
        let delta = timer.update();

        assert!(delta > 0.0);
        assert_eq!(timer.ticks(), 1);
        assert_eq!(timer.delta(), delta);
    }

    #[test]
    fn test_fixed_delta_overrides_wall_clock() {
        let mut timer = TickTimer::new();
        timer.set_fixed_delta(Some(0.016));

        thread::sleep(Duration::from_millis(50));
        let delta = timer.update();
        assert!((delta - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut timer = TickTimer::new();
        timer.update();
        timer.update();
        timer.reset();

        assert_eq!(timer.ticks(), 0);
        assert_eq!(timer.delta(), 0.0);
    }
}
