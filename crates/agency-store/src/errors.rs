//! Store-side error helpers
//!
//! Everything the store returns is an `ExError`; SQLite failures map to the
//! `Persistence` kind, which the dispatcher treats as a store failure.

use agency_core::errors::{ExError, ExErrorKind};
use agency_core::model::{EntityId, EntityKind};

pub type Result<T> = std::result::Result<T, ExError>;

/// Map a rusqlite error to a persistence error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Like [`from_rusqlite`] but naming the operation and table involved
pub fn store_failure(op: &str, kind: EntityKind, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(op)
        .with_entity_kind(kind)
        .with_message(err.to_string())
}

pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

pub fn not_found(kind: EntityKind, id: EntityId) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("lookup")
        .with_entity_kind(kind)
        .with_entity_id(id)
        .with_message(format!("{} not found", kind))
}

/// A field that is not a column of the target table, or a value of the wrong type
pub fn invalid_field(kind: EntityKind, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("update")
        .with_entity_kind(kind)
        .with_message(reason)
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
