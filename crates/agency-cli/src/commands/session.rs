//! Default session: fresh start, silent startup script, then the menu

use crate::commands::shell::interact;
use crate::config::Config;
use agency_core::errors::Result;
use agency_engine::run_script;
use agency_store::db::{open_and_migrate, reset};
use agency_store::errors::io_error;
use std::fs::File;
use std::io::BufReader;

pub fn execute(config: &Config) -> Result<()> {
    let mut conn = open_and_migrate(&config.database_path)?;
    if config.fresh_start {
        reset(&mut conn)?;
    }

    let script = &config.startup_script;
    if script.is_file() {
        let file = File::open(script).map_err(|e| io_error("open_startup_script", e))?;
        let report = run_script(&conn, BufReader::new(file))?;
        tracing::info!(
            script = %script.display(),
            executed = report.executed,
            skipped = report.skipped,
            store_failed = report.store_failed,
            "startup script applied"
        );
    } else {
        tracing::debug!(script = %script.display(), "no startup script");
    }

    interact(&conn)
}
