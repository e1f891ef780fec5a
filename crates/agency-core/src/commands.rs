//! Command inventory shared by the script decoder and the interactive menu
//!
//! Both front-ends produce a `Command`; the engine's `apply_command` is the
//! only consumer.

use crate::model::{
    EntityId, EntityKind, Field, FieldValue, JoinKind, NewAgent, NewAuthor, NewBook, NewCustomer,
    NewSalary, StatKind,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum Command {
    /// Stop processing remaining lines
    Stop,

    RegisterAgent(NewAgent),
    RegisterBook(NewBook),
    RegisterAuthor(NewAuthor),
    RegisterCustomer(NewCustomer),

    /// Register a salary, optionally requesting a link to an agent
    RegisterSalary {
        salary: NewSalary,
        link_agent: Option<EntityId>,
    },

    /// Set one field of one row
    Update {
        kind: EntityKind,
        id: EntityId,
        field: Field,
        value: FieldValue,
    },

    /// Cascade-delete one row
    Purge { kind: EntityKind, id: EntityId },

    Display(EntityKind),
    Compute(StatKind),
    Joins(JoinKind),

    /// Statement handed straight to the store; failures are swallowed
    RawSql(String),
}

impl Command {
    /// Short operation name used in logs and error context
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::Stop => "stop",
            Command::RegisterAgent(_) => "register_agent",
            Command::RegisterBook(_) => "register_book",
            Command::RegisterAuthor(_) => "register_author",
            Command::RegisterCustomer(_) => "register_customer",
            Command::RegisterSalary { .. } => "register_salary",
            Command::Update { .. } => "update",
            Command::Purge { .. } => "purge",
            Command::Display(_) => "display",
            Command::Compute(_) => "compute",
            Command::Joins(_) => "joins",
            Command::RawSql(_) => "raw_sql",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names() {
        assert_eq!(Command::Stop.op_name(), "stop");
        let cmd = Command::Purge {
            kind: EntityKind::Agent,
            id: EntityId::from_raw(7),
        };
        assert_eq!(cmd.op_name(), "purge");
        assert_eq!(Command::Display(EntityKind::Book).op_name(), "display");
    }

    #[test]
    fn test_command_clone() {
        let cmd1 = Command::Update {
            kind: EntityKind::Customer,
            id: EntityId::from_raw(4),
            field: Field::BookId,
            value: FieldValue::Int(9),
        };
        let cmd2 = cmd1.clone();
        assert_eq!(cmd1, cmd2);
    }

    #[test]
    fn test_serializes_with_command_tag() {
        let json = serde_json::to_value(Command::Compute(StatKind::BookCost)).unwrap();
        assert_eq!(json["command"], "compute");
    }
}
