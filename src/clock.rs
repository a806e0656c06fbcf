//! Time source for scheduling
//!
//! Review math works on epoch seconds as `f64`, so every caller that
//! schedules or selects words takes a `Clock` instead of reading the
//! system time directly.

use chrono::{DateTime, TimeZone, Utc};

/// Seconds in one day, the unit review intervals are expressed in.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub trait Clock {
    /// Current time in epoch seconds
    fn now(&self) -> f64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        Utc::now().timestamp_millis() as f64 / 1000.0
    }
}

/// Clock pinned to a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}

/// Convert epoch seconds to a UTC datetime for display.
pub fn to_datetime(epoch: f64) -> Option<DateTime<Utc>> {
    let millis = (epoch * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(millis).single()
}
