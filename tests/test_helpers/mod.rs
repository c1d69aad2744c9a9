//! Shared helpers for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Clock that advances by a fixed step on every UTC reading.
///
/// Gives each created task a distinct `created_at` so newest-first ordering
/// is deterministic.
pub struct SteppingClock {
    start: DateTime<Utc>,
    step_millis: i64,
    readings: AtomicI64,
}

impl SteppingClock {
    /// Creates a clock starting at 2026-01-13T10:30:00Z that advances one
    /// second per reading.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 13, 10, 30, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            start,
            step_millis: 1_000,
            readings: AtomicI64::new(0),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let reading = self.readings.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::milliseconds(reading.saturating_mul(self.step_millis))
    }
}
