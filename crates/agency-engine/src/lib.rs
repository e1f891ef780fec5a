//! Agency Engine - integrity rules and command orchestration
//!
//! Sits between the pure `agency-core` model and the `agency-store`
//! repositories. Every command, whether it comes from a script line or the
//! interactive menu, is applied through [`apply_command`].

pub mod commands;
pub mod script;

pub use commands::{apply_command, CommandOutcome};
pub use script::{run_script, run_script_text, LineOutcome, LineResult, ScriptReport};
