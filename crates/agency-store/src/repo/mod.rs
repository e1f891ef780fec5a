//! Repository layer over a borrowed `rusqlite::Connection`
//!
//! Every operation is a single statement (or a short read); nothing here
//! opens a transaction.

pub mod entity_repo;
pub mod link_repo;
pub mod report_repo;

pub use entity_repo::EntityRepo;
pub use link_repo::LinkRepo;
pub use report_repo::ReportRepo;
