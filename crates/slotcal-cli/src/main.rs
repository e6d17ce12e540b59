use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod actions_cmd;
mod cli;
mod error;
mod filters_cmd;
mod shared;
mod slots_cmd;
mod week_cmd;

use actions_cmd::run_actions;
use cli::{Cli, Commands};
use error::{CliResult, OutputFormat, output_format_hint, parse_output_format, render_error};
use filters_cmd::run_filters;
use slots_cmd::run_slots;
use week_cmd::run_week;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Week(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_week(args, format))
        }
        Commands::Slots(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_slots(args, format))
        }
        Commands::Actions(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_actions(args, format))
        }
        Commands::Filters(args) => {
            let requested = args.output_format.clone();
            dispatch(&requested, |format| run_filters(args, format))
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(
    requested: &str,
    run: impl FnOnce(OutputFormat) -> CliResult<ExitCode>,
) -> ExitCode {
    let fallback = output_format_hint(requested);
    let output_format = match parse_output_format(requested) {
        Ok(format) => format,
        Err(err) => return render_error(&err, fallback),
    };

    match run(output_format) {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}
