//! Entity columns and typed field values
//!
//! `Field` is the closed set of user-visible columns. Column names double as
//! the field names accepted by update commands.

use crate::errors::AgencyError;
use crate::model::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user-visible column of one of the entity tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    PhoneNumber,
    Experience,
    AuthorId,
    Cost,
    HourlyCharge,
    AgentId,
    BookId,
    /// Salary amount (the `Salary` column of `Salaries`)
    Amount,
    SalaryBonus,
    PaidLeaveDuration,
}

impl Field {
    /// Column name in the persisted layout
    pub fn column(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::PhoneNumber => "PhoneNumber",
            Field::Experience => "Experience",
            Field::AuthorId => "AuthorID",
            Field::Cost => "Cost",
            Field::HourlyCharge => "HourlyCharge",
            Field::AgentId => "AgentID",
            Field::BookId => "BookID",
            Field::Amount => "Salary",
            Field::SalaryBonus => "SalaryBonus",
            Field::PaidLeaveDuration => "PaidLeaveDuration",
        }
    }

    /// Integer-typed columns; values must be non-negative integers
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Field::Name | Field::PhoneNumber)
    }

    /// Columns holding a reference to another entity (0 = unset)
    pub fn references(&self) -> Option<EntityKind> {
        match self {
            Field::AuthorId => Some(EntityKind::Author),
            Field::AgentId => Some(EntityKind::Agent),
            Field::BookId => Some(EntityKind::Book),
            _ => None,
        }
    }

    /// Validate a raw textual value against this field's type
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumeric` when the field is integer-typed and `raw` is
    /// not a non-negative integer.
    pub fn parse_value(&self, raw: &str) -> Result<FieldValue, AgencyError> {
        if self.is_numeric() {
            parse_non_negative(self.column(), raw).map(FieldValue::Int)
        } else {
            Ok(FieldValue::Text(raw.to_string()))
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A typed value for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parse a non-negative integer made only of ASCII digits
///
/// Signs, whitespace, decimal points and values that overflow `i64` are all
/// rejected.
///
/// # Errors
///
/// Returns `InvalidNumeric` naming `field` when `raw` does not qualify.
pub fn parse_non_negative(field: &str, raw: &str) -> Result<i64, AgencyError> {
    let invalid = || AgencyError::InvalidNumeric {
        field: field.to_string(),
        value: raw.to_string(),
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<i64>().map_err(|_| invalid())
}
