use std::process::ExitCode;

use slotcal_core::{CalendarFilters, FileStorage, FilterStore};
use tracing::info;

use crate::cli::{FiltersAction, FiltersArgs};
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::print_json;

pub fn run_filters(args: FiltersArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let mut store = FilterStore::new(FileStorage::new(&args.prefs_dir));

    if let FiltersAction::Set { in_person, online } = args.action {
        store.update(|current| CalendarFilters {
            in_person: in_person.unwrap_or(current.in_person),
            online: online.unwrap_or(current.online),
        });
        info!(prefs_dir = %args.prefs_dir, filters = ?store.get(), "saved filters");
    }

    let filters = store.get();
    match output_format {
        OutputFormat::Json => print_json(&filters)?,
        OutputFormat::Text => {
            println!("in_person: {}", filters.in_person);
            println!("online: {}", filters.online);
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
