//! Structured results of applying a command
//!
//! Nothing here is formatted text; the CLI decides how to render outcomes.

use agency_core::model::{
    CustomerSnapshot, EntityId, EntityKind, Field, Stats, TableView,
};
use serde::Serialize;

/// Result of a salary link request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SalaryLink {
    /// The agent had no salary; a link row was created
    Linked { link: EntityId },
    /// The agent already links a salary; nothing changed
    Declined { existing: Option<EntityId> },
}

impl SalaryLink {
    pub fn is_linked(&self) -> bool {
        matches!(self, SalaryLink::Linked { .. })
    }
}

/// Effect of bringing an agent's benefit in line with its experience
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BenefitChange {
    Granted { benefit: EntityId },
    Revoked { benefits: Vec<EntityId> },
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterOutcome {
    pub kind: EntityKind,
    pub id: EntityId,
    /// Agent registration only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit: Option<BenefitChange>,
    /// Salary registration with an agent id only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_link: Option<SalaryLink>,
    /// Book registration with an author only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_link: Option<EntityId>,
    /// Customer registration only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<CustomerSnapshot>,
}

impl RegisterOutcome {
    pub fn new(kind: EntityKind, id: EntityId) -> Self {
        Self {
            kind,
            id,
            benefit: None,
            salary_link: None,
            author_link: None,
            snapshot: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub kind: EntityKind,
    pub id: EntityId,
    pub field: Field,
    pub rows_affected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit: Option<BenefitChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<CustomerSnapshot>,
}

/// A cascade step that failed; later steps still ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub step: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub kind: EntityKind,
    pub id: EntityId,
    /// Whether the row itself was removed (false if it did not exist)
    pub deleted: bool,
    pub links_removed: usize,
    pub rows_nullified: usize,
    pub dependents_purged: usize,
    pub failures: Vec<StepFailure>,
}

impl CascadeReport {
    pub fn new(kind: EntityKind, id: EntityId) -> Self {
        Self {
            kind,
            id,
            deleted: false,
            links_removed: 0,
            rows_nullified: 0,
            dependents_purged: 0,
            failures: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Stopped,
    Registered(RegisterOutcome),
    Updated(UpdateOutcome),
    Purged(CascadeReport),
    Table(TableView),
    Stats(Stats),
    Join(TableView),
    /// Raw statement; a store error is recorded but never propagated
    RawSql {
        rows_affected: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        swallowed_error: Option<String>,
    },
}

impl CommandOutcome {
    pub fn is_stop(&self) -> bool {
        matches!(self, CommandOutcome::Stopped)
    }
}
