pub mod entity;
pub mod field;
pub mod ids;
pub mod relation;
pub mod report;

pub use entity::{
    Agent, Customer, EntityKind, NewAgent, NewAuthor, NewBook, NewCustomer, NewEntity,
    NewSalary, NewWorkBenefit, WorkBenefit,
};
pub use field::{parse_non_negative, Field, FieldValue};
pub use ids::{fk_from_column, fk_to_column, EntityId};
pub use relation::{CustomerSnapshot, Relation};
pub use report::{Cell, JoinKind, StatKind, Stats, TableView};
