//! Read-only report shapes: table views, statistics and joined listings

use serde::{Deserialize, Serialize};
use std::fmt;

/// One value of a report row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("NULL"),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Real(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Column headers plus rows, in the order the store returned them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    pub fn new(title: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Aggregate statistics available from `5|<code>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    AgentExperience,
    BookCost,
    SalaryAmount,
}

impl StatKind {
    pub fn from_code(code: &str) -> Option<StatKind> {
        match code {
            "1" => Some(StatKind::AgentExperience),
            "2" => Some(StatKind::BookCost),
            "3" => Some(StatKind::SalaryAmount),
            _ => None,
        }
    }

    /// `(table, column)` the aggregate runs over
    pub fn source(&self) -> (&'static str, &'static str) {
        match self {
            StatKind::AgentExperience => ("Agents", "Experience"),
            StatKind::BookCost => ("Books", "Cost"),
            StatKind::SalaryAmount => ("Salaries", "Salary"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::AgentExperience => "Agent experience",
            StatKind::BookCost => "Book cost",
            StatKind::SalaryAmount => "Salary",
        }
    }
}

/// MIN/AVG/MAX over one column; all `None` when the table is empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub kind: StatKind,
    pub count: i64,
    pub min: Option<i64>,
    pub avg: Option<f64>,
    pub max: Option<i64>,
}

/// Joined listings available from `6|<code>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    /// Customers LEFT JOIN Agents
    CustomerAgent,
    /// Agents JOIN WorkBenefits
    AgentBenefit,
    /// Agents JOIN AgentSalary JOIN Salaries
    AgentSalary,
}

impl JoinKind {
    pub fn from_code(code: &str) -> Option<JoinKind> {
        match code {
            "1" => Some(JoinKind::CustomerAgent),
            "2" => Some(JoinKind::AgentBenefit),
            "3" => Some(JoinKind::AgentSalary),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            JoinKind::CustomerAgent => "Customers and their agents",
            JoinKind::AgentBenefit => "Agents and their work benefits",
            JoinKind::AgentSalary => "Agents and their salaries",
        }
    }

    pub fn columns(&self) -> [&'static str; 4] {
        match self {
            JoinKind::CustomerAgent => ["CustomerID", "CustomerName", "AgentID", "AgentName"],
            JoinKind::AgentBenefit => ["AgentID", "AgentName", "SalaryBonus", "PaidLeaveDuration"],
            JoinKind::AgentSalary => ["AgentID", "AgentName", "Salary", "SalaryExperience"],
        }
    }
}
