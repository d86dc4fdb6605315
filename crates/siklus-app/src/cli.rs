use clap::{ArgAction, Args, Parser, Subcommand};
use siklus_core::config::OutputFormat;

/// Siklus menstrual cycle calculator.
#[derive(Parser)]
#[command(
    name = "siklus",
    version,
    about = "Estimate ovulation, fertile and safe days and paint them on a calendar"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format; defaults to `output.format` from the configuration.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the landmarks of one cycle.
    Estimate(EstimateArgs),
    /// Print classified month calendars.
    Calendar(CalendarArgs),
    /// List the selectable cycle lengths.
    Options,
}

/// Arguments for the `estimate` subcommand.
#[derive(Args)]
pub struct EstimateArgs {
    /// First day of the last period (YYYY-MM-DD).
    #[arg(long)]
    pub start: String,

    /// Cycle length in days; defaults to `cycle.default_length`.
    #[arg(long, allow_negative_numbers = true)]
    pub cycle_length: Option<i64>,
}

/// Arguments for the `calendar` subcommand.
#[derive(Args)]
pub struct CalendarArgs {
    /// First day of the last period (YYYY-MM-DD). Without it every day is
    /// shown as a normal day.
    #[arg(long)]
    pub start: Option<String>,

    /// Cycle length in days; defaults to `cycle.default_length`.
    #[arg(long, allow_negative_numbers = true)]
    pub cycle_length: Option<i64>,

    /// First month to show (YYYY-MM); defaults to the start date's month, or
    /// the current month.
    #[arg(long)]
    pub month: Option<String>,

    /// Date to highlight as today (YYYY-MM-DD); defaults to the system date.
    #[arg(long)]
    pub today: Option<String>,

    /// Number of consecutive months to show.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=24))]
    pub months: u8,
}
