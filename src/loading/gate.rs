use std::time::Duration;

use bevy::prelude::*;
use bevy::time::Stopwatch;

/// Holds the loading screen until assets are loaded *and* the minimum
/// display time, counted from when loading started, has passed.
#[derive(Resource, Debug)]
pub struct LoadGate {
    min_display: Duration,
    shown_for: Stopwatch,
    loaded: bool,
    opened: bool,
}

impl LoadGate {
    pub fn new(min_display: Duration) -> Self {
        Self {
            min_display,
            shown_for: Stopwatch::new(),
            loaded: false,
            opened: false,
        }
    }

    pub fn tick(&mut self, delta: Duration) {
        self.shown_for.tick(delta);
    }

    /// Latches once progress reaches 100; later values cannot unlatch it.
    pub fn observe(&mut self, percent: f32) {
        if percent >= 100.0 {
            self.loaded = true;
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn min_display_elapsed(&self) -> bool {
        self.shown_for.elapsed() >= self.min_display
    }

    pub fn is_ready(&self) -> bool {
        self.is_loaded() && self.min_display_elapsed()
    }

    /// True exactly once, the first time the gate is found ready.
    pub fn poll(&mut self) -> bool {
        if self.opened || !self.is_ready() {
            return false;
        }
        self.opened = true;
        true
    }

    pub fn elapsed(&self) -> Duration {
        self.shown_for.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const STEP: Duration = Duration::from_millis(10);

    /// Steps the gate through a progress curve and returns when it opened.
    fn run(gate: &mut LoadGate, progress_at: impl Fn(Duration) -> f32, limit: Duration) -> Option<Duration> {
        let mut now = Duration::ZERO;
        while now <= limit {
            gate.observe(progress_at(now));
            if gate.poll() {
                return Some(now);
            }
            gate.tick(STEP);
            now += STEP;
        }
        None
    }

    #[test]
    fn loaded_at_start_opens_after_min_display() {
        let mut gate = LoadGate::new(Duration::from_millis(4000));
        let opened = run(&mut gate, |_| 100.0, Duration::from_secs(10)).unwrap();
        assert_eq!(opened, Duration::from_millis(4000));
    }

    #[test]
    fn slow_load_opens_when_load_completes() {
        let mut gate = LoadGate::new(Duration::from_millis(1500));
        let opened = run(
            &mut gate,
            |t| if t >= Duration::from_millis(3000) { 100.0 } else { 50.0 },
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(opened, Duration::from_millis(3000));
    }

    #[test]
    fn never_opens_without_full_progress() {
        let mut gate = LoadGate::new(Duration::from_millis(100));
        assert_eq!(run(&mut gate, |_| 99.9, Duration::from_secs(5)), None);
        assert!(gate.min_display_elapsed());
        assert!(!gate.is_ready());
    }

    #[test]
    fn zero_min_display_opens_as_soon_as_loaded() {
        let mut gate = LoadGate::new(Duration::ZERO);
        gate.observe(100.0);
        assert!(gate.poll());
    }

    #[test]
    fn poll_fires_once() {
        let mut gate = LoadGate::new(Duration::ZERO);
        gate.observe(100.0);
        assert!(gate.poll());
        gate.tick(STEP);
        assert!(!gate.poll());
        assert!(gate.is_ready());
    }

    #[test]
    fn opens_no_earlier_than_both_conditions() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let min_display = Duration::from_millis(rng.gen_range(0..5000) / 10 * 10);
            let done_at = Duration::from_millis(rng.gen_range(0..6000) / 10 * 10);
            let mut gate = LoadGate::new(min_display);

            // Monotonic ramp that hits 100 at `done_at`.
            let opened = run(
                &mut gate,
                |t| {
                    if t >= done_at {
                        100.0
                    } else {
                        99.0 * t.as_secs_f32() / done_at.as_secs_f32().max(f32::EPSILON)
                    }
                },
                Duration::from_secs(20),
            )
            .unwrap();

            let expected = done_at.max(min_display);
            assert!(opened >= expected, "{opened:?} < {expected:?}");
            assert!(opened < expected + STEP, "{opened:?} too late for {expected:?}");
        }
    }
}
