//! Embedded, checksummed schema migrations
//!
//! Each migration is applied once and recorded in `schema_version` together
//! with the SHA-256 of its SQL. Re-running is a no-op; a recorded checksum
//! that no longer matches the embedded SQL is reported as an error.

mod checksums;
mod embedded;
mod runner;

pub use checksums::compute_checksum;
pub use embedded::{get_migrations, Migration};
pub use runner::{applied_migrations, apply_migrations};
