//! Instant parsing.
//!
//! Slot start times arrive from upstream in several shapes:
//! - RFC3339 with offset (e.g., `2024-03-01T09:05:00+01:00`)
//! - Naive local date-times, read in the reference timezone (e.g., `2024-03-01T09:05`)
//! - Date-only strings, read as UTC midnight (e.g., `2024-03-01`)
//! - Unix epoch milliseconds, as an integer string or a JSON number
//!
//! Anything else becomes [`Instant::Invalid`], which every computation in
//! this crate accepts and maps to its own sentinel output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tz::{REFERENCE_TZ, format_rfc3339_utc, local_to_utc};

/// Naive local formats accepted by [`Instant::parse`].
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// An absolute point in time, or the raw text of an input that is not one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instant {
    Valid(DateTime<Utc>),
    Invalid(String),
}

impl Instant {
    /// Parse an instant from text. Never fails; unparseable text is kept as
    /// [`Instant::Invalid`].
    ///
    /// # Examples
    ///
    /// ```
    /// use slotcal_core::parse::Instant;
    ///
    /// assert!(Instant::parse("2024-03-01T09:05:00Z").is_valid());
    /// assert!(Instant::parse("2024-03-01T09:05").is_valid());
    /// assert!(!Instant::parse("next tuesday").is_valid());
    /// ```
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        parse_rfc3339(trimmed)
            .or_else(|| parse_local(trimmed))
            .or_else(|| parse_date_only(trimmed))
            .or_else(|| parse_epoch_ms(trimmed))
            .map(Instant::Valid)
            .unwrap_or_else(|| Instant::Invalid(input.to_string()))
    }

    /// Placeholder for an absent start field.
    pub fn missing() -> Self {
        Instant::Invalid(String::new())
    }

    /// Build an instant from Unix epoch milliseconds.
    pub fn from_epoch_ms(ms: i64) -> Self {
        Utc.timestamp_millis_opt(ms)
            .single()
            .map(Instant::Valid)
            .unwrap_or_else(|| Instant::Invalid(ms.to_string()))
    }

    /// The UTC datetime, if this instant is valid.
    pub fn valid(&self) -> Option<DateTime<Utc>> {
        match self {
            Instant::Valid(dt) => Some(*dt),
            Instant::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Instant::Valid(_))
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Instant::Valid(dt)
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instant::Valid(dt) => f.write_str(&format_rfc3339_utc(dt)),
            Instant::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInstant {
    Millis(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawInstant::deserialize(deserializer)? {
            RawInstant::Millis(ms) => Instant::from_epoch_ms(ms),
            RawInstant::Float(ms) if ms.is_finite() && ms.abs() < i64::MAX as f64 => {
                Instant::from_epoch_ms(ms.trunc() as i64)
            }
            RawInstant::Float(ms) => Instant::Invalid(ms.to_string()),
            RawInstant::Text(text) => Instant::parse(&text),
            RawInstant::Other(value) => Instant::Invalid(value.to_string()),
        })
    }
}

fn parse_rfc3339(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a naive local date-time in the reference timezone.
fn parse_local(input: &str) -> Option<DateTime<Utc>> {
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .and_then(|local| local_to_utc(local, REFERENCE_TZ))
}

fn parse_date_only(input: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn parse_epoch_ms(input: &str) -> Option<DateTime<Utc>> {
    let ms: i64 = input.parse().ok()?;
    Utc.timestamp_millis_opt(ms).single()
}
