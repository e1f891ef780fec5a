//! Interactive menu over an existing database

use crate::config::Config;
use crate::menu::Menu;
use agency_core::errors::Result;
use agency_store::db::open_and_migrate;
use rusqlite::Connection;

pub(crate) fn interact(conn: &Connection) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Menu::new(stdin.lock(), stdout.lock()).run(conn)
}

pub fn execute(config: &Config) -> Result<()> {
    let conn = open_and_migrate(&config.database_path)?;
    interact(&conn)
}
