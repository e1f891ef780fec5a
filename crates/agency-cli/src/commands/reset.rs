//! Drop and recreate every table

use crate::config::Config;
use agency_core::errors::Result;
use agency_store::db::{open_and_migrate, reset};

pub fn execute(config: &Config) -> Result<()> {
    let mut conn = open_and_migrate(&config.database_path)?;
    reset(&mut conn)?;
    println!("Database reset: {}", config.database_path.display());
    Ok(())
}
