//! Agency Store - SQLite persistence for the publishing agency
//!
//! Provides:
//! - Connection management and the drop-and-recreate `reset`
//! - Embedded, checksummed migrations for the ten-table layout
//! - `EntityRepo` for the six entity tables
//! - `LinkRepo` for the four link tables
//! - `ReportRepo` for table views, statistics, joins and raw statements

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use errors::Result;
pub use repo::{EntityRepo, LinkRepo, ReportRepo};
