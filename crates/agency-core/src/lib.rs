//! Agency Core - domain model and command language for the publishing agency
//!
//! This crate provides the I/O-free half of the system:
//! - Entity, field, id and link-relation models
//! - The pipe-delimited tokenizer and the command decoder
//! - The `Command` inventory consumed by the engine's dispatcher
//! - Pure business rules: benefit eligibility and per-entity cascade plans
//! - The canonical error and logging facilities

pub mod commands;
pub mod decode;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;
pub mod tokenizer;

// Re-exported for the logging macros
pub use agency_core_types;

// Re-export commonly used types
pub use commands::Command;
pub use decode::{decode, parse_line};
pub use errors::{AgencyError, ExError, ExErrorKind, Result};
pub use model::{EntityId, EntityKind, Field, FieldValue, Relation};
pub use tokenizer::{tokenize, Tokenized};
