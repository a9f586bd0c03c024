use chrono::{Duration, Utc};
use quotesim_core::Timestamp;
use quotesim_ports::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Manually advanced clock for deterministic tests
///
/// Time never moves on its own; it only advances when `advance` or
/// `set_time` is called. Granularity is one millisecond, matching the
/// resolution of emitted ticks.
pub struct ManualClock {
    /// The time this clock was created at
    start: Timestamp,
    /// Offset from `start`, in milliseconds
    offset_ms: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at the given time
    pub fn new(start: Timestamp) -> Self {
        Self {
            start,
            offset_ms: AtomicI64::new(0),
        }
    }

    /// Create a clock frozen at the current wall-clock time
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        self.offset_ms
            .fetch_add(duration.num_milliseconds(), Ordering::SeqCst);
    }

    /// Jump the clock to an absolute time
    ///
    /// Warning: this can move time backwards. Use with caution.
    pub fn set_time(&self, time: Timestamp) {
        self.offset_ms
            .store((time - self.start).num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.start + Duration::milliseconds(self.offset_ms.load(Ordering::SeqCst))
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
