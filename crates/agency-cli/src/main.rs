//! Agency CLI
//!
//! Script interpreter and interactive menu for the publishing agency store.
//! Without a subcommand it runs a full session: optional fresh start, the
//! startup script, then the menu.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod menu;
mod render;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "agency")]
#[command(about = "Publishing agency records - script interpreter and interactive menu", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Configuration file (default: ./agency.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// development, production or quiet
    #[arg(long, global = true)]
    log_profile: Option<String>,

    /// Keep existing rows instead of recreating the tables at session start
    #[arg(long, global = true)]
    keep_data: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a script file in batch mode
    Run(commands::run::RunArgs),
    /// Apply a single command line
    Exec(commands::exec::ExecArgs),
    /// Interactive menu only, on the existing data
    Shell,
    /// Drop and recreate every table
    Reset,
}

fn run(cli: Cli) -> agency_core::Result<()> {
    let config =
        Config::load(cli.config.as_deref())?.with_overrides(cli.db, cli.log_profile, cli.keep_data);
    config.validate()?;
    agency_core::logging_facility::init(config.profile()?);

    match cli.command {
        None => commands::session::execute(&config),
        Some(Commands::Run(args)) => commands::run::execute(&config, args),
        Some(Commands::Exec(args)) => commands::exec::execute(&config, args),
        Some(Commands::Shell) => commands::shell::execute(&config),
        Some(Commands::Reset) => commands::reset::execute(&config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
