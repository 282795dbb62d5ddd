//! Time sources for keyword evaluation.
//!
//! `"now"` and `"today"` resolve against a [`Clock`] rather than the global
//! wall clock, so evaluation stays deterministic under test. [`SystemClock`]
//! is the default; [`FixedClock`] pins the clock to a known instant.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Trait for resolving the ambient current time during evaluation.
pub trait Clock {
    /// The current date-time.
    fn now(&self) -> NaiveDateTime;

    /// The current date. Defaults to the date component of [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The real local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Create a clock that always reports the given instant.
    pub fn new(instant: NaiveDateTime) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
