use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jks_cli::commands::{day, layout, util};
use jks_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output on stdout stays clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Layout { file, min_duration }) => {
            let min_duration = util::parse_duration(min_duration)?;
            let input = util::read_input(file.as_deref())?;
            layout::run(&mut stdout, &input, min_duration)?;
        }
        Some(Commands::Day {
            file,
            date,
            min_duration,
            json,
        }) => {
            let date = util::parse_date(date, Local::now().date_naive())?;
            let min_duration = match min_duration {
                Some(s) => util::parse_duration(s)?,
                None => config.min_duration_secs,
            };
            let path = file.as_deref().unwrap_or(config.agenda_path.as_path());
            let input = util::read_input(Some(path))?;
            let agenda = day::parse_agenda(&input)
                .with_context(|| format!("failed to load agenda from {}", path.display()))?;

            let options = day::DayOptions {
                date,
                min_duration,
                slot_minutes: config.slot_minutes,
                json: *json,
            };
            day::run(&mut stdout, &agenda, &Local, options)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
