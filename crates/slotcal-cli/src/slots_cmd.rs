use std::process::ExitCode;

use serde::Serialize;
use slotcal_core::format::{format_date, format_time_range};
use slotcal_core::{
    AvailabilityMode, CalendarFilters, FileStorage, FilterStore, Slot, build_availability,
    filter_by_format, group_by_day,
};
use tracing::debug;

use crate::cli::SlotsArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{decode_json, print_json, read_input, weekday_of};

pub fn run_slots(args: SlotsArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let filters = if args.use_saved_filters {
        FilterStore::new(FileStorage::new(&args.prefs_dir)).get()
    } else {
        CalendarFilters::new(args.in_person, args.online)
    };

    let raw = read_input(&args.input)?;
    let slots: Vec<Slot> = decode_json(&raw, &args.input)?;
    let result = summarize_slots(&slots, filters);
    debug!(
        total = result.total,
        kept = result.kept,
        dropped = result.dropped,
        "grouped slots"
    );

    match output_format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => {
            for day in &result.days {
                println!("{} {}", day.weekday, day.date);
                for slot in &day.slots {
                    let modes: Vec<String> = slot
                        .availability
                        .iter()
                        .map(|mode| format!("{} {}", mode.label, mode.remaining))
                        .collect();
                    println!(
                        "  {}  {}  {}",
                        slot.time_range,
                        slot.title.as_deref().or(slot.id.as_deref()).unwrap_or("-"),
                        modes.join(", ")
                    );
                }
            }
            if result.dropped > 0 {
                println!("({} slot(s) without a valid start)", result.dropped);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn summarize_slots(slots: &[Slot], filters: CalendarFilters) -> SlotsOutput {
    let kept = filter_by_format(slots, filters);
    let buckets = group_by_day(kept.iter().copied());

    let days: Vec<DayGroup> = buckets
        .into_iter()
        .map(|(key, day)| DayGroup {
            key: key.to_string(),
            weekday: day.first().map(|s| weekday_of(&s.start)).unwrap_or(""),
            date: day.first().map(|s| format_date(&s.start)).unwrap_or_default(),
            slots: day.into_iter().map(slot_line).collect(),
        })
        .collect();
    let grouped: usize = days.iter().map(|d| d.slots.len()).sum();

    SlotsOutput {
        filters,
        total: slots.len(),
        kept: kept.len(),
        dropped: kept.len() - grouped,
        days,
    }
}

fn slot_line(slot: &Slot) -> SlotLine {
    SlotLine {
        id: slot.id.clone(),
        title: slot.title.clone(),
        start: slot.start.to_string(),
        time_range: format_time_range(&slot.start, slot.duration_hours),
        availability: build_availability(Some(slot)),
    }
}

#[derive(Debug, Serialize)]
struct SlotsOutput {
    filters: CalendarFilters,
    total: usize,
    kept: usize,
    dropped: usize,
    days: Vec<DayGroup>,
}

#[derive(Debug, Serialize)]
struct DayGroup {
    key: String,
    weekday: &'static str,
    date: String,
    slots: Vec<SlotLine>,
}

#[derive(Debug, Serialize)]
struct SlotLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    start: String,
    time_range: String,
    availability: Vec<AvailabilityMode>,
}
