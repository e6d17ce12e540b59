//! Week scaffold computation.
//!
//! Weeks run Monday to Sunday in the reference timezone. Week boundaries are
//! computed on local calendar dates and converted back to instants one day at
//! a time, so a week containing a DST transition is 167 or 169 hours long and
//! every day still starts at local midnight.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::clock::{Clock, today_key};
use crate::models::{CalendarDay, DateKey};
use crate::parse::Instant;
use crate::tz::{instant_from_parts, local_date, parts_of};

/// French weekday labels, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

/// Label of a weekday by its Monday-first index.
pub fn weekday_label(index: usize) -> Option<&'static str> {
    WEEKDAYS.get(index).copied()
}

/// Days since Monday of a local date.
fn day_index(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_monday())
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    instant_from_parts(parts_of(date))
}

/// Local midnight of the Monday that begins the ISO week containing `instant`.
///
/// An invalid instant is returned unchanged.
///
/// # Examples
///
/// ```
/// use slotcal_core::parse::Instant;
/// use slotcal_core::tz::date_key;
/// use slotcal_core::week::week_start;
///
/// // 2024-03-31 is a Sunday
/// let start = week_start(&Instant::parse("2024-03-31T18:00"));
/// assert_eq!(date_key(&start).unwrap().as_str(), "2024-03-25");
/// ```
pub fn week_start(instant: &Instant) -> Instant {
    let Some(date) = local_date(instant) else {
        return instant.clone();
    };

    date.checked_sub_signed(Duration::days(day_index(date)))
        .and_then(midnight)
        .map(Instant::Valid)
        .unwrap_or_else(|| Instant::Invalid(instant.to_string()))
}

/// ISO-8601 week number of the local date of `instant`.
///
/// The date is shifted to the Thursday of its week and compared with January
/// 4th of that Thursday's year, which always lies in week 1. Returns `None`
/// for an invalid instant.
pub fn week_number(instant: &Instant) -> Option<u32> {
    let date = local_date(instant)?;
    let thursday = date.checked_add_signed(Duration::days(3 - day_index(date)))?;
    let first_thursday = NaiveDate::from_ymd_opt(thursday.year(), 1, 4)?;
    let diff_days = (thursday - first_thursday).num_days() as f64;

    u32::try_from(1 + (diff_days / 7.0).round() as i64).ok()
}

/// Local midnight of the Monday `weeks` weeks away from the week containing
/// `instant`. Negative values move backwards.
pub fn shift_weeks(instant: &Instant, weeks: i64) -> Instant {
    let start = week_start(instant);
    let Some(monday) = local_date(&start) else {
        return start;
    };

    Duration::try_weeks(weeks)
        .and_then(|delta| monday.checked_add_signed(delta))
        .and_then(midnight)
        .map(Instant::Valid)
        .unwrap_or_else(|| Instant::Invalid(instant.to_string()))
}

/// The seven days of the week starting on the local date of `week_start`.
///
/// Each day is reconstructed from its own local date, so the spacing between
/// consecutive days follows the DST rules. `is_today` compares each day's key
/// with the clock's current local day. An invalid start yields no days.
pub fn calendar_days(week_start: &Instant, clock: &dyn Clock) -> Vec<CalendarDay> {
    let Some(first) = local_date(week_start) else {
        return Vec::new();
    };
    let today = today_key(clock);

    first
        .iter_days()
        .take(WEEKDAYS.len())
        .filter_map(|date| {
            let date_utc = midnight(date)?;
            let key = DateKey::from_parts(parts_of(date));
            let is_today = today.as_ref() == Some(&key);
            Some(CalendarDay {
                date: date_utc,
                key,
                is_today,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::tz::{REFERENCE_TZ, date_key};
    use chrono::{TimeZone, Weekday};
    use proptest::prelude::*;

    fn local(s: &str) -> Instant {
        Instant::parse(s)
    }

    fn key(instant: &Instant) -> String {
        date_key(instant).unwrap().to_string()
    }

    #[test]
    fn week_start_from_sunday() {
        let start = week_start(&local("2024-03-31T23:30"));
        assert_eq!(key(&start), "2024-03-25");
        // Monday before the spring switch is still CET
        assert_eq!(
            start.valid().unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 24, 23, 0, 0).unwrap()
        );
    }

    #[test]
    fn week_start_from_monday_is_same_day() {
        let start = week_start(&local("2024-04-01T00:00"));
        assert_eq!(key(&start), "2024-04-01");
        // After the switch Paris is UTC+2
        assert_eq!(
            start.valid().unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 31, 22, 0, 0).unwrap()
        );
    }

    #[test]
    fn week_start_uses_local_date_not_utc_date() {
        // Sunday 23:30 UTC is already Monday in Paris
        let start = week_start(&Instant::parse("2024-03-03T23:30:00Z"));
        assert_eq!(key(&start), "2024-03-04");
    }

    #[test]
    fn week_start_invalid_passes_through() {
        let invalid = Instant::Invalid("nope".into());
        assert_eq!(week_start(&invalid), invalid);
    }

    #[test]
    fn week_number_mid_year() {
        assert_eq!(week_number(&local("2024-03-01T09:05")), Some(9));
        assert_eq!(week_number(&local("2024-07-14T12:00")), Some(28));
    }

    #[test]
    fn week_number_late_december_in_previous_year_week() {
        // 2021-01-03 (Sunday) belongs to 2020-W53
        assert_eq!(week_number(&local("2021-01-03T12:00")), Some(53));
        // 2023-01-01 (Sunday) belongs to 2022-W52
        assert_eq!(week_number(&local("2023-01-01T12:00")), Some(52));
    }

    #[test]
    fn week_number_late_december_in_next_year_week() {
        // 2024-12-30 (Monday) belongs to 2025-W01
        assert_eq!(week_number(&local("2024-12-30T08:00")), Some(1));
        // 2026-01-01 (Thursday) belongs to 2026-W01
        assert_eq!(week_number(&local("2026-01-01T08:00")), Some(1));
    }

    #[test]
    fn week_number_invalid() {
        assert_eq!(week_number(&Instant::Invalid("x".into())), None);
    }

    #[test]
    fn shift_weeks_across_dst() {
        let start = local("2024-03-27T10:00");
        let next = shift_weeks(&start, 1);
        assert_eq!(key(&next), "2024-04-01");
        let previous = shift_weeks(&start, -2);
        assert_eq!(key(&previous), "2024-03-11");
    }

    #[test]
    fn calendar_days_spring_forward_week() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 31, 10, 0, 0).unwrap());
        let days = calendar_days(&week_start(&local("2024-03-28T12:00")), &clock);

        assert_eq!(days.len(), 7);
        let keys: Vec<&str> = days.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "2024-03-25",
                "2024-03-26",
                "2024-03-27",
                "2024-03-28",
                "2024-03-29",
                "2024-03-30",
                "2024-03-31"
            ]
        );
        let today: Vec<bool> = days.iter().map(|d| d.is_today).collect();
        assert_eq!(today, vec![false, false, false, false, false, false, true]);

        // Every day starts at local midnight
        for day in &days {
            let local = day.date.with_timezone(&REFERENCE_TZ);
            assert_eq!(local.format("%H:%M").to_string(), "00:00");
        }
    }

    #[test]
    fn calendar_days_invalid_start() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 31, 10, 0, 0).unwrap());
        assert!(calendar_days(&Instant::Invalid("x".into()), &clock).is_empty());
    }

    #[test]
    fn weekday_labels() {
        assert_eq!(weekday_label(0), Some("Lundi"));
        assert_eq!(weekday_label(6), Some("Dimanche"));
        assert_eq!(weekday_label(7), None);
    }

    proptest! {
        #[test]
        fn week_start_is_an_idempotent_monday(secs in 0i64..4_102_444_800i64) {
            let instant = Instant::Valid(Utc.timestamp_opt(secs, 0).unwrap());
            let start = week_start(&instant);
            let date = local_date(&start).unwrap();

            prop_assert_eq!(date.weekday(), Weekday::Mon);
            prop_assert_eq!(week_start(&start), start.clone());
            let local = start.valid().unwrap().with_timezone(&REFERENCE_TZ);
            prop_assert_eq!(local.format("%H:%M:%S").to_string(), "00:00:00");
        }

        #[test]
        fn week_number_matches_iso_week(secs in 0i64..4_102_444_800i64) {
            let instant = Instant::Valid(Utc.timestamp_opt(secs, 0).unwrap());
            let number = week_number(&instant).unwrap();
            let date = local_date(&instant).unwrap();

            prop_assert!((1..=53).contains(&number));
            prop_assert_eq!(number, date.iso_week().week());
        }
    }
}
