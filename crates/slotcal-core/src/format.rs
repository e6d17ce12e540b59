//! Display formatting of dates and times in the reference timezone.
//!
//! Invalid instants render as fixed placeholders instead of failing.

use chrono::{DateTime, Duration, Utc};

use crate::parse::Instant;
use crate::tz::{REFERENCE_TZ, utc_to_local};

pub const DATE_PLACEHOLDER: &str = "--/--/----";
pub const TIME_PLACEHOLDER: &str = "--h--";

/// Shortest duration a time range is rendered with, in hours.
const MIN_DURATION_HOURS: f64 = 0.25;
const DEFAULT_DURATION_HOURS: f64 = 1.0;

/// Format the local date as `DD/MM/YYYY`.
pub fn format_date(instant: &Instant) -> String {
    match instant.valid() {
        Some(utc) => utc_to_local(utc, REFERENCE_TZ)
            .format("%d/%m/%Y")
            .to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

/// Format the local time as `HHhMM`, 24-hour.
pub fn format_time(instant: &Instant) -> String {
    instant
        .valid()
        .map(format_utc_time)
        .unwrap_or_else(|| TIME_PLACEHOLDER.to_string())
}

fn format_utc_time(utc: DateTime<Utc>) -> String {
    utc_to_local(utc, REFERENCE_TZ).format("%Hh%M").to_string()
}

/// Format `"<start> - <end>"` for a slot lasting `duration_hours`.
///
/// Durations shorter than a quarter hour are stretched to a quarter hour and
/// non-finite durations count as one hour.
///
/// # Examples
///
/// ```
/// use slotcal_core::format::format_time_range;
/// use slotcal_core::parse::Instant;
///
/// let start = Instant::parse("2024-03-01T09:05");
/// assert_eq!(format_time_range(&start, 1.5), "09h05 - 10h35");
/// assert_eq!(format_time_range(&start, f64::NAN), "09h05 - 10h05");
/// ```
pub fn format_time_range(start: &Instant, duration_hours: f64) -> String {
    let Some(start) = start.valid() else {
        return format!("{TIME_PLACEHOLDER} - {TIME_PLACEHOLDER}");
    };

    let hours = if duration_hours.is_finite() {
        duration_hours.max(MIN_DURATION_HOURS)
    } else {
        DEFAULT_DURATION_HOURS
    };
    let end = Duration::try_milliseconds((hours * 3_600_000.0) as i64)
        .and_then(|delta| start.checked_add_signed(delta));

    format!(
        "{} - {}",
        format_utc_time(start),
        end.map(format_utc_time)
            .unwrap_or_else(|| TIME_PLACEHOLDER.to_string())
    )
}

/// Whether an optional text has any non-whitespace content.
pub fn has_content(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads() {
        assert_eq!(format_time(&Instant::parse("2024-03-01T09:05")), "09h05");
        assert_eq!(format_time(&Instant::parse("2024-03-01T00:00")), "00h00");
        assert_eq!(format_time(&Instant::parse("2024-03-01T23:59")), "23h59");
    }

    #[test]
    fn format_time_uses_reference_zone() {
        // 08:05 UTC is 09:05 in Paris in winter and 10:05 in summer
        assert_eq!(format_time(&Instant::parse("2024-03-01T08:05:00Z")), "09h05");
        assert_eq!(format_time(&Instant::parse("2024-07-01T08:05:00Z")), "10h05");
    }

    #[test]
    fn format_date_local() {
        assert_eq!(format_date(&Instant::parse("2024-03-01T09:05")), "01/03/2024");
        // Still February 29th in UTC
        assert_eq!(
            format_date(&Instant::parse("2024-02-29T23:30:00Z")),
            "01/03/2024"
        );
    }

    #[test]
    fn invalid_placeholders() {
        let invalid = Instant::parse("nope");
        assert_eq!(format_date(&invalid), "--/--/----");
        assert_eq!(format_time(&invalid), "--h--");
        assert_eq!(format_time_range(&invalid, 2.0), "--h-- - --h--");
    }

    #[test]
    fn time_range_clamps_short_durations() {
        let start = Instant::parse("2024-03-01T09:00");
        assert_eq!(format_time_range(&start, 0.1), "09h00 - 09h15");
        assert_eq!(format_time_range(&start, -4.0), "09h00 - 09h15");
        assert_eq!(format_time_range(&start, f64::INFINITY), "09h00 - 10h00");
    }

    #[test]
    fn time_range_across_spring_forward() {
        // 01:30 CET + 1h = 03:30 CEST
        let start = Instant::parse("2024-03-31T01:30");
        assert_eq!(format_time_range(&start, 1.0), "01h30 - 03h30");
    }

    #[test]
    fn has_content_checks_whitespace() {
        assert!(has_content(Some("Salle 2")));
        assert!(!has_content(Some("   \n")));
        assert!(!has_content(Some("")));
        assert!(!has_content(None));
    }
}
