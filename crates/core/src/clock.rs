//! Injected time source.
//!
//! Daily completion windows depend on "today", so the current instant is
//! never read from a global inside domain code. Handlers receive a
//! [`Clock`] through application state; tests substitute a [`FixedClock`]
//! to cross day boundaries deterministically.
//!
//! Calendar days are UTC dates.

use std::sync::Mutex;

use chrono::{Duration, Utc};

use crate::types::{CalendarDate, Timestamp};

/// Source of the current instant and calendar day.
pub trait Clock: Send + Sync {
    /// Current instant (UTC).
    fn now(&self) -> Timestamp;

    /// Current calendar day. Defaults to the UTC date of [`Clock::now`].
    fn today(&self) -> CalendarDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A manually controlled clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn new(instant: Timestamp) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// A clock pinned to noon UTC on the given day.
    pub fn at_noon(date: CalendarDate) -> Self {
        let instant = date
            .and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now);
        Self::new(instant)
    }

    /// Replace the current instant.
    pub fn set(&self, instant: Timestamp) {
        *self.lock() = instant;
    }

    /// Move the clock forward (or backward, for negative values) by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut guard = self.lock();
        *guard += Duration::days(days);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Timestamp> {
        // A poisoned lock still holds a valid timestamp.
        self.instant.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.lock()
    }
}

/// Half-open UTC instant range `[start, end)` covering `date`.
pub fn day_bounds(date: CalendarDate) -> (Timestamp, Timestamp) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}
