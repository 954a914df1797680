//! Fixed-delay periodic scheduling
//!
//! The next tick is due one interval after the previous one *finished*, so a
//! late host never produces a burst of catch-up ticks.

/// Source of millisecond timestamps
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock for native hosts
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to (headless runs and tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// A periodic task that can be started and stopped
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval_ms: f64,
    /// `None` while stopped
    next_due_ms: Option<f64>,
}

impl Scheduler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Arm with the first run due immediately
    pub fn start(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms);
    }

    /// Disarm; nothing is due until the next `start`
    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.next_due_ms
    }

    /// Claim the pending run if it is due. The scheduler stays disarmed
    /// until `rearm` or `start`, so at most one run is in flight.
    pub fn take_due(&mut self, now_ms: f64) -> bool {
        match self.next_due_ms {
            Some(due) if due <= now_ms => {
                self.next_due_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Schedule the next run one interval after `now_ms`
    pub fn rearm(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + self.interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_due_immediately() {
        let mut s = Scheduler::new(20.0);
        assert!(!s.take_due(0.0));
        s.start(5.0);
        assert!(s.take_due(5.0));
        assert!(!s.is_running());
    }

    #[test]
    fn test_fixed_delay_without_catch_up() {
        let mut s = Scheduler::new(20.0);
        s.start(0.0);
        assert!(s.take_due(0.0));
        s.rearm(0.0);
        assert!(!s.take_due(19.0));
        // Host was 80 ms late: one run, then the delay restarts from here
        assert!(s.take_due(100.0));
        s.rearm(100.0);
        assert!(!s.take_due(100.0));
        assert_eq!(s.next_due_ms(), Some(120.0));
    }

    #[test]
    fn test_stop() {
        let mut s = Scheduler::new(20.0);
        s.start(0.0);
        s.stop();
        assert!(!s.take_due(1_000.0));
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::default();
        clock.advance(20.0);
        clock.advance(5.5);
        assert_eq!(clock.now_ms(), 25.5);
    }
}
