//! Subcommand implementations

pub mod exec;
pub mod reset;
pub mod run;
pub mod session;
pub mod shell;
