use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hours_cli::commands::{categories, entries, export, import, log, overview, select, status};
use hours_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so exported JSON on stdout stays clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let today = Local::now().date_naive();
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Categories) => categories::run(&mut stdout, &config)?,
        Some(Commands::Select(args)) => select::run(&mut stdout, args, &config)?,
        Some(Commands::Log(args)) => log::run(&mut stdout, args, &config, today)?,
        Some(Commands::Entries) => entries::run(&mut stdout, &config)?,
        Some(Commands::Overview(args)) => overview::run(&mut stdout, args, &config, today)?,
        Some(Commands::Export(args)) => export::run(&mut stdout, args, &config)?,
        Some(Commands::Import(args)) => import::run(&mut stdout, args, &config)?,
        Some(Commands::Status) => status::run(&mut stdout, &config)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
