use std::time::{Duration, Instant};

/// Nominal tick cadence while a night is counting down
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Event-poll timeout while no tick source is active
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The timer's tick source, modeled as a scoped resource.
///
/// Exactly one deadline exists per live timer: `start()` while active is a
/// no-op (no duplicate interval sources), `stop()` releases unconditionally.
/// The event loop asks `poll_timeout` how long to block and `tick_due`
/// whether a tick should be delivered. Drift against the wall clock is
/// accepted, not compensated.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self { interval: TICK_INTERVAL, next_due: None }
    }

    /// Acquire the tick source. No-op if already active.
    pub fn start(&mut self) {
        if self.next_due.is_none() {
            self.next_due = Some(Instant::now() + self.interval);
        }
    }

    /// Release the tick source. No further ticks are due after this.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// How long the event loop may block before the next tick
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => IDLE_POLL,
        }
    }

    /// Whether a tick is due at `now`; schedules the next deadline if so
    pub fn tick_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(due + self.interval);
                true
            }
            _ => false,
        }
    }
}
