use jiff::Timestamp;

/// Wall-clock capability consumed by time-based generators and by the
/// classifier's plausibility-window checks.
///
/// Callers supply the clock explicitly so tests can pin time to a fixed
/// instant; production call sites pass [`SystemClock`].
pub trait Clock: Send + Sync {
    /// Returns the current time of the clock.
    fn now(&self) -> Timestamp;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock pinned to a single instant.
///
/// Used by tests for deterministic round-trips, and usable by callers that
/// want to classify or generate "as of" a known time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    pub fn new(at: Timestamp) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
