use std::fs;
use std::io::{self, Read};

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use slotcal_core::parse::Instant;
use slotcal_core::tz::local_date;
use slotcal_core::week::weekday_label;
use slotcal_core::{Clock, FixedClock, SlotCalError, SystemClock};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Read the whole input from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &str) -> CliResult<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| {
                CliError::runtime(format!("Failed to read stdin: {}", e)).with_input(path)
            })?;
        return Ok(buf);
    }

    debug!(path, "reading input file");
    fs::read_to_string(path).map_err(|e| {
        CliError::runtime(format!("Failed to open file '{}': {}", path, e)).with_input(path)
    })
}

/// Decode the JSON read from `path`. Malformed documents are input errors.
pub fn decode_json<T: DeserializeOwned>(raw: &str, path: &str) -> CliResult<T> {
    serde_json::from_str(raw)
        .map_err(|e| SlotCalError::Parse(format!("invalid JSON in '{}': {}", path, e)))
        .map_err(|e| CliError::from(e).with_input(path))
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Parse an instant argument, rejecting text that is not a point in time.
pub fn parse_instant_arg(name: &str, value: &str) -> CliResult<DateTime<Utc>> {
    Instant::parse(value).valid().ok_or_else(|| {
        CliError::input(format!(
            "Invalid {} '{}'. Expected RFC3339, YYYY-MM-DDTHH:MM or epoch milliseconds",
            name, value
        ))
    })
}

/// The clock to use, pinned when `--now` was given.
pub fn clock_from_arg(now: Option<&str>) -> CliResult<Box<dyn Clock>> {
    match now {
        Some(value) => Ok(Box::new(FixedClock(parse_instant_arg("--now", value)?))),
        None => Ok(Box::new(SystemClock)),
    }
}

/// French weekday label of an instant's local date.
pub fn weekday_of(instant: &Instant) -> &'static str {
    local_date(instant)
        .and_then(|date| weekday_label(date.weekday().num_days_from_monday() as usize))
        .unwrap_or("")
}

pub fn format_utc(dt: &DateTime<Utc>) -> String {
    slotcal_core::tz::format_rfc3339_utc(dt)
}
