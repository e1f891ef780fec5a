//! Batch script command
//!
//! Usage: agency run <SCRIPT> [--echo] [--json]

use crate::config::Config;
use crate::render;
use agency_core::errors::{ExError, ExErrorKind, Result};
use agency_engine::run_script;
use agency_store::db::open_and_migrate;
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Script file, one command per line
    pub script: PathBuf,

    /// Print each line and its outcome
    #[arg(long)]
    pub echo: bool,

    /// Print the full run report as JSON
    #[arg(long, conflicts_with = "echo")]
    pub json: bool,
}

pub fn execute(config: &Config, args: RunArgs) -> Result<()> {
    let file = File::open(&args.script).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("open_script")
            .with_message(format!("cannot open {}: {}", args.script.display(), e))
    })?;
    let conn = open_and_migrate(&config.database_path)?;

    let report = run_script(&conn, BufReader::new(file))?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("run")
                .with_message(e.to_string())
        })?;
        println!("{}", json);
    } else if args.echo {
        for line in &report.lines {
            if let Some(text) = render::line(line) {
                print!("{}", text);
            }
        }
        println!(
            "{} executed, {} skipped, {} failed",
            report.executed, report.skipped, report.store_failed
        );
    }
    Ok(())
}
