use std::time::Instant;

/// Monotonic time source for the scene loop, in seconds.
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Wall-clock time since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Deterministic clock for headless runs and tests.
///
/// Reads alternate between frame start and frame end: every second read
/// advances time by `step`, so each frame measures exactly `step` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedClock {
    time: f64,
    step: f64,
    mid_frame: bool,
}

impl SimulatedClock {
    pub fn new(step: f64) -> Self {
        Self {
            time: 0.0,
            step: step.max(0.0),
            mid_frame: false,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Clock for SimulatedClock {
    fn now(&mut self) -> f64 {
        if self.mid_frame {
            self.time += self.step;
        }
        self.mid_frame = !self.mid_frame;
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_clock_measures_one_step_per_frame() {
        let mut clock = SimulatedClock::new(0.25);
        for frame in 0..4 {
            let start = clock.now();
            let end = clock.now();
            assert_eq!(start, frame as f64 * 0.25);
            assert_eq!(end - start, 0.25);
        }
    }

    #[test]
    fn negative_step_is_clamped() {
        let mut clock = SimulatedClock::new(-1.0);
        clock.now();
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
