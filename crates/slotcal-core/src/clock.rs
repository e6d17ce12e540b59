//! The "now" accessor.
//!
//! The only impure input in slotcal is the wall clock, read when deciding
//! whether a calendar day is today. It always arrives through a [`Clock`] so
//! tests and the CLI can pin it.

use chrono::{DateTime, Utc};

use crate::models::DateKey;
use crate::parse::Instant;
use crate::tz::date_key;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The [`DateKey`] of the current day in the reference timezone.
pub fn today_key(clock: &dyn Clock) -> Option<DateKey> {
    date_key(&Instant::Valid(clock.now()))
}

/// Whether an instant falls on the current local day.
pub fn is_today(instant: &Instant, clock: &dyn Clock) -> bool {
    match (date_key(instant), today_key(clock)) {
        (Some(key), Some(today)) => key == today,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_today() {
        // 23:30 UTC on 2024-03-01 is already 2024-03-02 in Paris
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 23, 30, 0).unwrap());
        assert_eq!(today_key(&clock).unwrap(), "2024-03-02");
    }

    #[test]
    fn is_today_compares_local_days() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap());
        assert!(is_today(&Instant::parse("2024-03-02T00:00"), &clock));
        assert!(is_today(&Instant::parse("2024-03-01T23:00:00Z"), &clock));
        assert!(!is_today(&Instant::parse("2024-03-01T22:59:00Z"), &clock));
        assert!(!is_today(&Instant::parse("bogus"), &clock));
    }

    #[test]
    fn system_clock_has_a_today() {
        assert!(today_key(&SystemClock).is_some());
    }
}
