//! Fixed timestep scheduler
//!
//! Converts wall-clock time since session start into a target tick count and
//! runs the simulation step until it catches up, a few ticks per invocation at
//! most. Elapsed time is never reset, so whatever is left over is simply
//! picked up on the next call.

use std::time::Instant;

use crate::settings::Settings;

/// Outcome of one driver invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatchUp {
    /// Ticks executed during this call
    pub executed: u32,
    /// Ticks still owed after this call (carried to the next one)
    pub deficit: u64,
}

/// Fixed timestep scheduler with bounded catch-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDriver {
    tick_ms: f64,
    max_catch_up: u32,
}

impl TickDriver {
    pub fn new(tick_ms: f64, max_catch_up: u32) -> Self {
        Self {
            tick_ms,
            max_catch_up,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_ms(), settings.max_catch_up)
    }

    pub fn tick_ms(&self) -> f64 {
        self.tick_ms
    }

    /// Number of ticks that should have run after `elapsed_ms`
    pub fn desired_ticks(&self, elapsed_ms: f64) -> u64 {
        if elapsed_ms <= 0.0 || !elapsed_ms.is_finite() {
            return 0;
        }
        (elapsed_ms / self.tick_ms).floor() as u64
    }

    /// Run `step` until `current` reaches the desired count or the cap is hit
    ///
    /// `step` must advance the tick counter by exactly one; `current` reads it.
    pub fn advance<S>(
        &self,
        elapsed_ms: f64,
        state: &mut S,
        current: impl Fn(&S) -> u64,
        mut step: impl FnMut(&mut S),
    ) -> CatchUp {
        let desired = self.desired_ticks(elapsed_ms);

        let mut executed = 0;
        while desired > current(state) && executed < self.max_catch_up {
            step(state);
            executed += 1;
        }

        let deficit = desired.saturating_sub(current(state));
        if deficit > 0 {
            log::warn!("Catch-up capped: {} tick(s) carried forward", deficit);
        }

        CatchUp { executed, deficit }
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Monotonic wall clock started at session start
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Milliseconds since `start`
    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(driver: &TickDriver, elapsed_ms: f64, counter: &mut u64) -> CatchUp {
        driver.advance(elapsed_ms, counter, |c| *c, |c| *c += 1)
    }

    #[test]
    fn test_desired_ticks() {
        let driver = TickDriver::default();
        assert_eq!(driver.desired_ticks(0.0), 0);
        assert_eq!(driver.desired_ticks(16.0), 0);
        assert_eq!(driver.desired_ticks(16.7), 1);
        assert_eq!(driver.desired_ticks(1000.0), 60);
        assert_eq!(driver.desired_ticks(-5.0), 0);
    }

    #[test]
    fn test_advance_runs_owed_ticks() {
        let driver = TickDriver::default();
        let mut counter = 0;

        let report = run(&driver, 34.0, &mut counter);
        assert_eq!(counter, 2);
        assert_eq!(report, CatchUp { executed: 2, deficit: 0 });

        // Nothing owed yet
        let report = run(&driver, 40.0, &mut counter);
        assert_eq!(report.executed, 0);
        assert_eq!(counter, 2);
    }

    #[test]
    fn test_catch_up_is_capped_and_carried() {
        let driver = TickDriver::default();
        let mut counter = 0;

        // A 200 ms stall owes 12 ticks; only 3 run per call
        let report = run(&driver, 200.0, &mut counter);
        assert_eq!(report, CatchUp { executed: 3, deficit: 9 });

        let report = run(&driver, 200.0, &mut counter);
        assert_eq!(report, CatchUp { executed: 3, deficit: 6 });

        run(&driver, 200.0, &mut counter);
        let report = run(&driver, 200.0, &mut counter);
        assert_eq!(report.deficit, 0);
        assert_eq!(counter, 12);
    }

    #[test]
    fn test_stopwatch_is_monotonic() {
        let watch = Stopwatch::start();
        let a = watch.elapsed_ms();
        let b = watch.elapsed_ms();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
