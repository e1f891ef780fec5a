//! Command orchestration layer
//!
//! `dispatch` routes commands, `integrity` owns the cross-entity rules and
//! `outcome` holds the structured results handed back to callers.

pub mod dispatch;
pub mod integrity;
pub mod outcome;

pub use dispatch::apply_command;
pub use outcome::{
    BenefitChange, CascadeReport, CommandOutcome, RegisterOutcome, SalaryLink, StepFailure,
    UpdateOutcome,
};
