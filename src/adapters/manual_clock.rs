//! Caller-driven time source for tests and trade log replay.

use crate::ports::clock_port::ClockPort;
use chrono::{DateTime, TimeDelta, Utc};
use std::cell::Cell;

/// A clock that only moves when told to. Shared by reference, so `set` and
/// `advance` take `&self`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
