//! Connection management and schema lifecycle

use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;
use agency_core::model::{EntityKind, Relation};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Apply connection settings
pub fn configure(conn: &Connection) -> Result<()> {
    // journal_mode answers with the resulting mode ("memory" for in-memory dbs)
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
        .map_err(from_rusqlite)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(from_rusqlite)?;
    Ok(())
}

/// Open, configure and migrate a database file
pub fn open_and_migrate<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let mut conn = open(path)?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

/// In-memory counterpart of [`open_and_migrate`]
pub fn open_in_memory_migrated() -> Result<Connection> {
    let mut conn = open_in_memory()?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

/// Table names in drop order: link tables before entity tables
pub fn drop_order() -> Vec<&'static str> {
    Relation::ALL
        .iter()
        .map(Relation::table)
        .chain(EntityKind::ALL.iter().map(EntityKind::table))
        .collect()
}

/// Drop every table and recreate the schema
///
/// Generated ids start again from 1 afterwards.
pub fn reset(conn: &mut Connection) -> Result<()> {
    for table in drop_order() {
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {};", table))
            .map_err(from_rusqlite)?;
    }
    conn.execute_batch("DROP TABLE IF EXISTS schema_version;")
        .map_err(from_rusqlite)?;
    tracing::info!(component = "db", op = "reset", "all tables dropped");

    apply_migrations(conn)
}
