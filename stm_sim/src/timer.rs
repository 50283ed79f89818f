//! Cancelable periodic tick source
//!
//! The simulator has two conceptual interval timers (auto-approach and
//! electron spawning). Both are modeled as a single explicit handle driven by
//! the frame loop's `dt`, so a restart always replaces the previous schedule
//! instead of letting duplicate timers accumulate.

/// Fixed-period timer advanced by frame deltas.
#[derive(Debug, Clone, Copy)]
pub struct Periodic {
    period: f64,
    accumulated: f64,
    active: bool,
}

impl Periodic {
    /// New timer, not yet scheduled
    pub fn new(period: f64) -> Self {
        Self {
            period,
            accumulated: 0.0,
            active: false,
        }
    }

    /// Start (or restart) the schedule. Any previously accumulated time is
    /// discarded, so restarting never fires stale ticks.
    pub fn start(&mut self) {
        self.accumulated = 0.0;
        self.active = true;
    }

    /// Cancel the schedule. No draining: accumulated time is dropped.
    pub fn stop(&mut self) {
        self.accumulated = 0.0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `dt` seconds, returning how many periods elapsed.
    pub fn tick(&mut self, dt: f64) -> u32 {
        if !self.active {
            return 0;
        }
        self.accumulated += dt;
        let mut fired = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_timer_never_fires() {
        let mut timer = Periodic::new(0.1);
        assert_eq!(timer.tick(10.0), 0);
    }

    #[test]
    fn fires_once_per_period() {
        let mut timer = Periodic::new(0.1);
        timer.start();
        assert_eq!(timer.tick(0.05), 0);
        assert_eq!(timer.tick(0.05), 1);
        assert_eq!(timer.tick(0.1), 1);
    }

    #[test]
    fn large_delta_fires_multiple_ticks() {
        let mut timer = Periodic::new(0.1);
        timer.start();
        assert_eq!(timer.tick(0.35), 3);
    }

    #[test]
    fn restart_discards_accumulated_time() {
        let mut timer = Periodic::new(0.1);
        timer.start();
        timer.tick(0.09);
        timer.start();
        // Just short of a period again: the old 0.09 must not count
        assert_eq!(timer.tick(0.09), 0);
        assert_eq!(timer.tick(0.01), 1);
    }

    #[test]
    fn stop_is_abrupt() {
        let mut timer = Periodic::new(0.1);
        timer.start();
        timer.tick(0.09);
        timer.stop();
        assert!(!timer.is_active());
        assert_eq!(timer.tick(1.0), 0);
    }
}
