//! Time source port.

use chrono::{DateTime, Utc};

/// Supplies "now" for trade timestamps and trailing VWAP windows.
pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}
