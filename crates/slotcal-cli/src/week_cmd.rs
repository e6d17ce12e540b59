use std::process::ExitCode;

use serde::Serialize;
use slotcal_core::format::format_date;
use slotcal_core::parse::Instant;
use slotcal_core::week::{calendar_days, shift_weeks, week_number, week_start};

use crate::cli::WeekArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{clock_from_arg, format_utc, parse_instant_arg, print_json, weekday_of};

pub fn run_week(args: WeekArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let clock = clock_from_arg(args.now.as_deref())?;
    let at = match args.at.as_deref() {
        Some(value) => parse_instant_arg("--at", value)?,
        None => clock.now(),
    };

    let start = shift_weeks(&week_start(&Instant::Valid(at)), args.offset);
    let start_utc = start
        .valid()
        .ok_or_else(|| CliError::input(format!("Week offset {} is out of range", args.offset)))?;

    let days = calendar_days(&start, clock.as_ref())
        .into_iter()
        .map(|day| {
            let instant = Instant::Valid(day.date);
            WeekDay {
                key: day.key.to_string(),
                weekday: weekday_of(&instant),
                date: format_date(&instant),
                start_utc: format_utc(&day.date),
                is_today: day.is_today,
            }
        })
        .collect();

    let result = WeekOutput {
        week_start: format_utc(&start_utc),
        week_number: week_number(&start),
        days,
    };

    match output_format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => {
            match result.week_number {
                Some(number) => println!("Semaine {}", number),
                None => println!("Semaine ?"),
            }
            for day in &result.days {
                let marker = if day.is_today { " *" } else { "" };
                println!("{:<9} {}{}", day.weekday, day.date, marker);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct WeekOutput {
    week_start: String,
    week_number: Option<u32>,
    days: Vec<WeekDay>,
}

#[derive(Debug, Serialize)]
struct WeekDay {
    key: String,
    weekday: &'static str,
    date: String,
    start_utc: String,
    is_today: bool,
}
