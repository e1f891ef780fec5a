//! Link relations between entities
//!
//! Each relation is a table of `(owner, target)` rows with its own `Link`
//! primary key. `CustomerAgentBook` is the odd one out: it stores a
//! three-column snapshot of a customer's current agent and book.

use crate::model::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    AgentBenefit,
    AgentSalary,
    BookAuthor,
    CustomerAgentBook,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::AgentBenefit,
        Relation::AgentSalary,
        Relation::BookAuthor,
        Relation::CustomerAgentBook,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            Relation::AgentBenefit => "AgentBenefit",
            Relation::AgentSalary => "AgentSalary",
            Relation::BookAuthor => "BookAuthor",
            Relation::CustomerAgentBook => "CustomerAgentBook",
        }
    }

    /// Entity on the owning side of the link
    pub fn owner(&self) -> EntityKind {
        match self {
            Relation::AgentBenefit | Relation::AgentSalary => EntityKind::Agent,
            Relation::BookAuthor => EntityKind::Book,
            Relation::CustomerAgentBook => EntityKind::Customer,
        }
    }

    /// Entity on the target side of the link
    ///
    /// For `CustomerAgentBook` this is the agent; the book is a second target
    /// reachable through [`Relation::column_for`].
    pub fn target(&self) -> EntityKind {
        match self {
            Relation::AgentBenefit => EntityKind::WorkBenefit,
            Relation::AgentSalary => EntityKind::Salary,
            Relation::BookAuthor => EntityKind::Author,
            Relation::CustomerAgentBook => EntityKind::Agent,
        }
    }

    /// Column holding the id of `kind` in this relation, if it participates
    pub fn column_for(&self, kind: EntityKind) -> Option<&'static str> {
        match (self, kind) {
            (Relation::AgentBenefit, EntityKind::Agent) => Some("AgentID"),
            (Relation::AgentBenefit, EntityKind::WorkBenefit) => Some("BenefitID"),
            (Relation::AgentSalary, EntityKind::Agent) => Some("AgentID"),
            (Relation::AgentSalary, EntityKind::Salary) => Some("SalaryID"),
            (Relation::BookAuthor, EntityKind::Book) => Some("BookID"),
            (Relation::BookAuthor, EntityKind::Author) => Some("AuthorID"),
            (Relation::CustomerAgentBook, EntityKind::Customer) => Some("CustomerID"),
            (Relation::CustomerAgentBook, EntityKind::Agent) => Some("AgentID"),
            (Relation::CustomerAgentBook, EntityKind::Book) => Some("BookID"),
            _ => None,
        }
    }

    pub fn owner_column(&self) -> &'static str {
        self.column_for(self.owner()).unwrap_or("Link")
    }

    pub fn target_column(&self) -> &'static str {
        self.column_for(self.target()).unwrap_or("Link")
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// One `CustomerAgentBook` row; unset references stay `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub customer: EntityId,
    pub agent: Option<EntityId>,
    pub book: Option<EntityId>,
}
