mod cli;
mod commands;
mod error;
mod logging;
mod render;

use std::process;

use anyhow::Result;
use clap::Parser;
use siklus_core::config::load_config;
use siklus_core::types::CalendarDate;

use crate::cli::{Cli, Command};
use crate::commands::Context;

fn main() {
    let cli = Cli::parse();
    let log = logging::init(cli.verbose);

    if let Err(e) = run(cli, &log) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli, log: &logging::LogHandle) -> Result<()> {
    let settings = load_config()?;
    log.apply_configured(&settings.logging.level);

    let ctx = Context {
        format: cli.format.unwrap_or(settings.output.format),
        today: CalendarDate::from(chrono::Local::now().date_naive()),
        settings,
    };
    tracing::debug!(format = %ctx.format, today = %ctx.today, "Running command");

    let output = match cli.command {
        Command::Estimate(args) => commands::estimate(&ctx, &args)?,
        Command::Calendar(args) => commands::calendar(&ctx, &args)?,
        Command::Options => commands::options(&ctx)?,
    };
    println!("{output}");

    Ok(())
}
