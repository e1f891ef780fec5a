//! Single command line
//!
//! Usage: agency exec '<LINE>' [--json]

use crate::config::Config;
use crate::render;
use agency_core::errors::{ExError, ExErrorKind, Result};
use agency_core::parse_line;
use agency_engine::apply_command;
use agency_store::db::open_and_migrate;
use clap::Args;

#[derive(Debug, Args)]
pub struct ExecArgs {
    /// One line of the script language, e.g. `4|1`
    pub line: String,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// A rejected or failed command is reported on stderr; it never fails the process
pub fn execute(config: &Config, args: ExecArgs) -> Result<()> {
    let conn = open_and_migrate(&config.database_path)?;

    let command = match parse_line(&args.line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(()),
        Err(err) => {
            eprintln!("Error: {}", ExError::from(err));
            return Ok(());
        }
    };

    match apply_command(&conn, command) {
        Ok(outcome) if args.json => {
            let json = serde_json::to_string_pretty(&outcome).map_err(|e| {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("exec")
                    .with_message(e.to_string())
            })?;
            println!("{}", json);
        }
        Ok(outcome) => print!("{}", render::outcome(&outcome)),
        Err(err) => eprintln!("Error: {}", err),
    }
    Ok(())
}
