//! Reference timezone handling.
//!
//! Every "what day is this" question in slotcal is answered in one fixed
//! reference timezone, using chrono-tz's rule tables so that DST transitions
//! are honored. Two instants 23 or 25 hours apart across a transition are
//! classified by their local calendar date, never by a fixed UTC offset.

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::{CalendarDateParts, DateKey};
use crate::parse::Instant;

/// The timezone all calendar computations are expressed in.
pub const REFERENCE_TZ: Tz = chrono_tz::Europe::Paris;

/// Convert a UTC datetime to local time in the specified timezone.
pub fn utc_to_local(utc: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    utc.with_timezone(&tz)
}

/// Convert a local datetime in a specific timezone to UTC.
///
/// For ambiguous times (during fall back), the earlier occurrence is used.
/// For nonexistent times (during spring forward), the local time is read with
/// the offset in force before the transition, which shifts it forward by the
/// length of the gap: `02:30` in a one-hour gap becomes `03:30`.
///
/// Returns `None` only when the result is outside chrono's representable range.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before = local.checked_sub_signed(chrono::Duration::days(1))?;
            let offset = tz.offset_from_local_datetime(&before).earliest()?;
            let seconds = i64::from(offset.fix().local_minus_utc());
            local
                .checked_sub_signed(chrono::Duration::seconds(seconds))
                .map(|utc| utc.and_utc())
        }
    }
}

/// Convert local midnight of a date to UTC.
pub fn local_midnight_to_utc(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    local_to_utc(date.and_hms_opt(0, 0, 0)?, tz)
}

/// Local calendar date of an instant in the reference timezone.
pub fn local_date(instant: &Instant) -> Option<NaiveDate> {
    instant
        .valid()
        .map(|utc| utc_to_local(utc, REFERENCE_TZ).date_naive())
}

/// Calendar date parts of an instant in the reference timezone.
///
/// Returns `None` for an invalid instant.
pub fn date_parts(instant: &Instant) -> Option<CalendarDateParts> {
    local_date(instant).map(parts_of)
}

/// The [`DateKey`] of an instant in the reference timezone.
///
/// # Examples
///
/// ```
/// use slotcal_core::parse::Instant;
/// use slotcal_core::tz::date_key;
///
/// // 23:30 UTC on the last day of February is already March 1st in Paris
/// let key = date_key(&Instant::parse("2024-02-29T23:30:00Z")).unwrap();
/// assert_eq!(key.as_str(), "2024-03-01");
/// ```
pub fn date_key(instant: &Instant) -> Option<DateKey> {
    date_parts(instant).map(DateKey::from_parts)
}

/// Reconstruct the instant of local midnight for the given date parts.
///
/// Returns `None` when the parts do not name a real calendar date.
pub fn instant_from_parts(parts: CalendarDateParts) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)?;
    local_midnight_to_utc(date, REFERENCE_TZ)
}

pub(crate) fn parts_of(date: NaiveDate) -> CalendarDateParts {
    CalendarDateParts {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    }
}

/// Format a UTC datetime as RFC3339 with Z suffix.
pub fn format_rfc3339_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Instant {
        Instant::Valid(Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap())
    }

    #[test]
    fn utc_to_local_conversion() {
        // 2024-03-31 00:15 UTC = 01:15 Paris, before the switch at 02:00
        let local = utc_to_local(
            Utc.with_ymd_and_hms(2024, 3, 31, 0, 15, 0).unwrap(),
            REFERENCE_TZ,
        );
        assert_eq!(
            local.format("%Y-%m-%d %H:%M").to_string(),
            "2024-03-31 01:15"
        );
    }

    #[test]
    fn local_to_utc_conversion_normal() {
        let local = NaiveDate::from_ymd_opt(2024, 3, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let utc = local_to_utc(local, REFERENCE_TZ).unwrap();

        // 12:00 local (UTC+1) = 11:00 UTC
        assert_eq!(utc.format("%Y-%m-%d %H:%M").to_string(), "2024-03-30 11:00");
    }

    #[test]
    fn local_to_utc_in_other_zone_gap() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let local = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let utc = local_to_utc(local, tz).unwrap();

        // Read with EST (-05:00): 07:30 UTC = 03:30 EDT
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap());
    }

    #[test]
    fn date_key_across_midnight_offset() {
        assert_eq!(date_key(&at(2024, 2, 29, 22, 59)).unwrap(), "2024-02-29");
        assert_eq!(date_key(&at(2024, 2, 29, 23, 0)).unwrap(), "2024-03-01");
    }

    #[test]
    fn date_key_summer_offset() {
        // Paris is UTC+2 in July
        assert_eq!(date_key(&at(2024, 7, 14, 21, 59)).unwrap(), "2024-07-14");
        assert_eq!(date_key(&at(2024, 7, 14, 22, 0)).unwrap(), "2024-07-15");
    }

    #[test]
    fn same_local_day_across_spring_forward() {
        // 23 hours apart, both on 2024-03-31 local
        let early = at(2024, 3, 30, 23, 0);
        let late = at(2024, 3, 31, 21, 59);
        assert_eq!(date_key(&early), date_key(&late));
        assert_eq!(date_key(&at(2024, 3, 31, 22, 0)).unwrap(), "2024-04-01");
    }

    #[test]
    fn same_local_day_across_fall_back() {
        // 25-hour day: 2024-10-26 22:00Z to 2024-10-27 23:00Z
        let early = at(2024, 10, 26, 22, 0);
        let late = at(2024, 10, 27, 22, 59);
        assert_eq!(date_key(&early).unwrap(), "2024-10-27");
        assert_eq!(date_key(&late).unwrap(), "2024-10-27");
    }

    #[test]
    fn date_parts_invalid() {
        assert_eq!(date_parts(&Instant::Invalid("x".into())), None);
        assert_eq!(date_key(&Instant::Invalid("x".into())), None);
    }

    #[test]
    fn instant_from_parts_round_trip() {
        let parts = date_parts(&at(2024, 3, 31, 12, 0)).unwrap();
        assert_eq!(
            parts,
            CalendarDateParts {
                year: 2024,
                month: 3,
                day: 31
            }
        );

        let midnight = instant_from_parts(parts).unwrap();
        // Midnight on the spring-forward day is still CET
        assert_eq!(midnight, Utc.with_ymd_and_hms(2024, 3, 30, 23, 0, 0).unwrap());
    }

    #[test]
    fn instant_from_parts_out_of_range() {
        let bad = CalendarDateParts {
            year: 2024,
            month: 13,
            day: 1,
        };
        assert_eq!(instant_from_parts(bad), None);
        let bad_day = CalendarDateParts {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(instant_from_parts(bad_day), None);
    }

    #[test]
    fn format_rfc3339_utc_zone() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 30, 23, 0, 0).unwrap();
        assert_eq!(format_rfc3339_utc(&dt), "2024-03-30T23:00:00Z");
    }
}
