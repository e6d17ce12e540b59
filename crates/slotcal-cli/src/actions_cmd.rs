use std::process::ExitCode;

use serde::{Deserialize, Serialize};
use slotcal_core::format::{format_date, format_time_range};
use slotcal_core::{
    ActionButton, AvailabilityMode, Registration, Slot, build_action_buttons, build_availability,
};

use crate::cli::ActionsArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{decode_json, print_json, read_input};

pub fn run_actions(args: ActionsArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let raw = read_input(&args.input)?;
    let input: ActionsInput = decode_json(&raw, &args.input)?;
    let result = derive_actions(&input);

    match output_format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => {
            if let (Some(date), Some(range)) = (&result.date, &result.time_range) {
                println!("{} {}", date, range);
            }
            for mode in &result.availability {
                let state = if mode.is_full { "complet" } else { "ouvert" };
                println!("  {}: {} ({})", mode.label, mode.remaining, state);
            }
            if result.actions.is_empty() {
                println!("  (aucune action)");
            }
            for action in &result.actions {
                println!("  [{}] {}", action.key, action.label);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn derive_actions(input: &ActionsInput) -> ActionsOutput {
    let slot = input.slot.as_ref();
    let availability = build_availability(slot);
    let actions = build_action_buttons(slot, input.registration.as_ref(), &availability);

    ActionsOutput {
        date: slot.map(|s| format_date(&s.start)),
        time_range: slot.map(|s| format_time_range(&s.start, s.duration_hours)),
        availability,
        actions,
    }
}

#[derive(Debug, Deserialize)]
struct ActionsInput {
    #[serde(default)]
    slot: Option<Slot>,
    #[serde(default)]
    registration: Option<Registration>,
}

#[derive(Debug, Serialize)]
struct ActionsOutput {
    date: Option<String>,
    time_range: Option<String>,
    availability: Vec<AvailabilityMode>,
    actions: Vec<ActionButton>,
}
