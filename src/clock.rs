use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Clock
///
/// Issues response timestamps. Wall-clock time can step backwards (NTP slew,
/// manual adjustment); the clock remembers the latest instant it handed out and
/// never returns anything earlier, so sequential responses carry non-decreasing
/// timestamps.
#[derive(Debug, Default)]
pub struct Clock {
    // Latest issued instant, in nanoseconds since the Unix epoch.
    last_nanos: AtomicI64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.observe(Utc::now())
    }

    /// Folds a wall-clock reading into the clock and returns the instant to report.
    pub fn observe(&self, reading: DateTime<Utc>) -> DateTime<Utc> {
        // Readings outside the i64 nanosecond range (year 2262+) are reported as-is.
        let Some(nanos) = reading.timestamp_nanos_opt() else {
            return reading;
        };
        let previous = self.last_nanos.fetch_max(nanos, Ordering::AcqRel);
        if previous > nanos {
            DateTime::from_timestamp_nanos(previous)
        } else {
            reading
        }
    }
}
