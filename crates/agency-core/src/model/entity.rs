//! The six base entities and their registration payloads

use crate::model::{fk_to_column, EntityId, Field, FieldValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of base entity tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Agent,
    Book,
    Author,
    Customer,
    Salary,
    WorkBenefit,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Agent,
        EntityKind::Book,
        EntityKind::Author,
        EntityKind::Customer,
        EntityKind::Salary,
        EntityKind::WorkBenefit,
    ];

    /// Map a register/update/purge table code (`1..=5`)
    ///
    /// WorkBenefit rows are derived and have no code on these surfaces.
    pub fn from_table_code(code: &str) -> Option<EntityKind> {
        match code {
            "1" => Some(EntityKind::Agent),
            "2" => Some(EntityKind::Book),
            "3" => Some(EntityKind::Author),
            "4" => Some(EntityKind::Customer),
            "5" => Some(EntityKind::Salary),
            _ => None,
        }
    }

    /// Map a display table code (`1..=6`, 6 = WorkBenefits)
    pub fn from_display_code(code: &str) -> Option<EntityKind> {
        match code {
            "6" => Some(EntityKind::WorkBenefit),
            other => EntityKind::from_table_code(other),
        }
    }

    /// Table name in the persisted layout
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Agent => "Agents",
            EntityKind::Book => "Books",
            EntityKind::Author => "Authors",
            EntityKind::Customer => "Customers",
            EntityKind::Salary => "Salaries",
            EntityKind::WorkBenefit => "WorkBenefits",
        }
    }

    /// Primary-key column name
    pub fn id_column(&self) -> &'static str {
        match self {
            EntityKind::Agent => "AgentID",
            EntityKind::Book => "BookID",
            EntityKind::Author => "AuthorID",
            EntityKind::Customer => "CustomerID",
            EntityKind::Salary => "SalaryID",
            EntityKind::WorkBenefit => "BenefitID",
        }
    }

    /// Non-key columns in table order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            EntityKind::Agent => &[Field::Name, Field::PhoneNumber, Field::Experience],
            EntityKind::Book => &[Field::AuthorId, Field::Name, Field::Cost],
            EntityKind::Author => &[Field::Name, Field::PhoneNumber, Field::HourlyCharge],
            EntityKind::Customer => &[
                Field::AgentId,
                Field::BookId,
                Field::Name,
                Field::PhoneNumber,
            ],
            EntityKind::Salary => &[Field::Amount, Field::Experience],
            EntityKind::WorkBenefit => &[
                Field::AgentId,
                Field::SalaryBonus,
                Field::PaidLeaveDuration,
            ],
        }
    }

    /// Whether `field` is a column of this entity
    pub fn has_field(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    /// Resolve a column name (case-insensitive) to one of this entity's fields
    pub fn field_by_column(&self, column: &str) -> Option<Field> {
        self.fields()
            .iter()
            .copied()
            .find(|f| f.column().eq_ignore_ascii_case(column))
    }

    /// Display columns including the primary key
    pub fn columns(&self) -> Vec<&'static str> {
        std::iter::once(self.id_column())
            .chain(self.fields().iter().map(Field::column))
            .collect()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Agent => "Agent",
            EntityKind::Book => "Book",
            EntityKind::Author => "Author",
            EntityKind::Customer => "Customer",
            EntityKind::Salary => "Salary",
            EntityKind::WorkBenefit => "WorkBenefit",
        };
        f.write_str(label)
    }
}

// ===== Rows read back from the store =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: EntityId,
    pub name: String,
    pub phone: String,
    pub experience: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,
    pub agent: Option<EntityId>,
    pub book: Option<EntityId>,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkBenefit {
    pub id: EntityId,
    pub agent: Option<EntityId>,
    pub salary_bonus: i64,
    pub paid_leave_days: i64,
}

// ===== Registration payloads =====

/// A payload that can be inserted as a new row
pub trait NewEntity {
    /// Target table
    fn kind(&self) -> EntityKind;

    /// Column values in table order
    fn values(&self) -> Vec<(Field, FieldValue)>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAgent {
    pub name: String,
    pub phone: String,
    pub experience: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub name: String,
    pub author: Option<EntityId>,
    pub cost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub phone: String,
    pub hourly_charge: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub agent: Option<EntityId>,
    pub book: Option<EntityId>,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSalary {
    pub amount: i64,
    pub experience: i64,
}

/// Derived benefit row; created only by benefit provisioning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkBenefit {
    pub agent: EntityId,
    pub salary_bonus: i64,
    pub paid_leave_days: i64,
}

impl NewEntity for NewAgent {
    fn kind(&self) -> EntityKind {
        EntityKind::Agent
    }

    fn values(&self) -> Vec<(Field, FieldValue)> {
        vec![
            (Field::Name, FieldValue::Text(self.name.clone())),
            (Field::PhoneNumber, FieldValue::Text(self.phone.clone())),
            (Field::Experience, FieldValue::Int(self.experience)),
        ]
    }
}

impl NewEntity for NewBook {
    fn kind(&self) -> EntityKind {
        EntityKind::Book
    }

    fn values(&self) -> Vec<(Field, FieldValue)> {
        vec![
            (Field::AuthorId, FieldValue::Int(fk_to_column(self.author))),
            (Field::Name, FieldValue::Text(self.name.clone())),
            (Field::Cost, FieldValue::Int(self.cost)),
        ]
    }
}

impl NewEntity for NewAuthor {
    fn kind(&self) -> EntityKind {
        EntityKind::Author
    }

    fn values(&self) -> Vec<(Field, FieldValue)> {
        vec![
            (Field::Name, FieldValue::Text(self.name.clone())),
            (Field::PhoneNumber, FieldValue::Text(self.phone.clone())),
            (Field::HourlyCharge, FieldValue::Int(self.hourly_charge)),
        ]
    }
}

impl NewEntity for NewCustomer {
    fn kind(&self) -> EntityKind {
        EntityKind::Customer
    }

    fn values(&self) -> Vec<(Field, FieldValue)> {
        vec![
            (Field::AgentId, FieldValue::Int(fk_to_column(self.agent))),
            (Field::BookId, FieldValue::Int(fk_to_column(self.book))),
            (Field::Name, FieldValue::Text(self.name.clone())),
            (Field::PhoneNumber, FieldValue::Text(self.phone.clone())),
        ]
    }
}

impl NewEntity for NewSalary {
    fn kind(&self) -> EntityKind {
        EntityKind::Salary
    }

    fn values(&self) -> Vec<(Field, FieldValue)> {
        vec![
            (Field::Amount, FieldValue::Int(self.amount)),
            (Field::Experience, FieldValue::Int(self.experience)),
        ]
    }
}

impl NewEntity for NewWorkBenefit {
    fn kind(&self) -> EntityKind {
        EntityKind::WorkBenefit
    }

    fn values(&self) -> Vec<(Field, FieldValue)> {
        vec![
            (Field::AgentId, FieldValue::Int(self.agent.get())),
            (Field::SalaryBonus, FieldValue::Int(self.salary_bonus)),
            (Field::PaidLeaveDuration, FieldValue::Int(self.paid_leave_days)),
        ]
    }
}
