//! Frame pacing.

use std::time::Duration;

/// Budgets the idle time that keeps the session loop at its fixed cadence.
///
/// Every frame's budget is independent: a frame that overruns the interval
/// forfeits its own idle period and nothing else. The overrun is not carried
/// into later frames, so a stall costs one late frame instead of a burst of
/// catch-up frames. Emulated time is unaffected either way, because the
/// machine is always advanced by exactly one interval per tick.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
    interval_ms: u32,
}

impl FramePacer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval: Duration::from_millis(u64::from(interval_ms)),
            interval_ms,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The interval in whole milliseconds, as handed to the machine's
    /// advance call.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Idle budget remaining after a tick body that took `elapsed`. Never
    /// negative; zero when the tick consumed the whole interval or more.
    pub fn idle_after(&self, elapsed: Duration) -> Duration {
        self.interval.saturating_sub(elapsed)
    }
}
