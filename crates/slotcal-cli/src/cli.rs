use clap::{Parser, Subcommand};

/// Training slot calendar inspection tool
#[derive(Parser, Debug)]
#[command(name = "slotcal")]
#[command(about = "Training slot calendar inspection tool")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the Monday-first week scaffold around an instant
    Week(WeekArgs),
    /// Filter slots by format and group them by local day
    Slots(SlotsArgs),
    /// Derive availability and action buttons for one slot
    Actions(ActionsArgs),
    /// Show or change the saved format filters
    Filters(FiltersArgs),
}

#[derive(clap::Args, Debug)]
pub struct WeekArgs {
    /// Instant inside the week (RFC3339, local YYYY-MM-DDTHH:MM, or epoch ms); defaults to now
    #[arg(long)]
    pub at: Option<String>,

    /// Weeks to move from the week containing --at (negative moves back)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset: i64,

    /// Override the current instant used for "today"
    #[arg(long)]
    pub now: Option<String>,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct SlotsArgs {
    /// Input file with a JSON array of slots (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Keep slots with on-site capacity
    #[arg(long)]
    pub in_person: bool,

    /// Keep slots with remote capacity
    #[arg(long)]
    pub online: bool,

    /// Use the saved filters instead of --in-person/--online
    #[arg(long, conflicts_with_all = ["in_person", "online"])]
    pub use_saved_filters: bool,

    /// Directory holding saved preferences
    #[arg(long, default_value = ".slotcal")]
    pub prefs_dir: String,

    /// Output format: json, text
    #[arg(long, default_value = "json")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ActionsArgs {
    /// Input file with a JSON object {"slot": ..., "registration": ...} (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Output format: json, text
    #[arg(long, default_value = "json")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct FiltersArgs {
    #[command(subcommand)]
    pub action: FiltersAction,

    /// Directory holding saved preferences
    #[arg(long, global = true, default_value = ".slotcal")]
    pub prefs_dir: String,

    /// Output format: json, text
    #[arg(long, global = true, default_value = "json")]
    pub output_format: String,
}

#[derive(Subcommand, Debug)]
pub enum FiltersAction {
    /// Print the saved filters
    Show,
    /// Change the saved filters; omitted flags keep their value
    Set {
        /// Keep slots with on-site capacity: true, false
        #[arg(long)]
        in_person: Option<bool>,

        /// Keep slots with remote capacity: true, false
        #[arg(long)]
        online: Option<bool>,
    },
}
