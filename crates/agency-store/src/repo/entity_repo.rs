//! Entity Repository: generic row access for the six entity tables
//!
//! Knows nothing about links or invariants. Column and table names come from
//! the closed `EntityKind`/`Field` enums, so the only values bound at runtime
//! are parameters.

use crate::errors::{invalid_field, store_failure, Result};
use agency_core::model::{
    fk_from_column, Agent, Customer, EntityId, EntityKind, Field, FieldValue, NewEntity,
    WorkBenefit,
};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};

pub(crate) fn to_sql(value: &FieldValue) -> Value {
    match value {
        FieldValue::Int(v) => Value::Integer(*v),
        FieldValue::Text(s) => Value::Text(s.clone()),
    }
}

pub struct EntityRepo;

impl EntityRepo {
    /// Insert a row and return the id generated by the store
    pub fn create(conn: &Connection, entity: &dyn NewEntity) -> Result<EntityId> {
        let kind = entity.kind();
        let values = entity.values();

        let columns: Vec<&str> = values.iter().map(|(f, _)| f.column()).collect();
        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            kind.table(),
            columns.join(", "),
            placeholders.join(", ")
        );

        conn.execute(&sql, params_from_iter(values.iter().map(|(_, v)| to_sql(v))))
            .map_err(|e| store_failure("create", kind, e))?;

        Ok(EntityId::from_raw(conn.last_insert_rowid()))
    }

    /// Set one column of one row; returns the number of rows matched
    ///
    /// The field must be a column of `kind` and the value must have the
    /// column's type.
    pub fn update(
        conn: &Connection,
        kind: EntityKind,
        id: EntityId,
        field: Field,
        value: &FieldValue,
    ) -> Result<usize> {
        if !kind.has_field(field) {
            return Err(invalid_field(
                kind,
                format!("{} is not a column of {}", field, kind.table()),
            )
            .with_entity_id(id));
        }
        if field.is_numeric() != matches!(value, FieldValue::Int(_)) {
            return Err(invalid_field(
                kind,
                format!("value '{}' has the wrong type for {}", value, field),
            )
            .with_entity_id(id));
        }

        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE {} = ?2",
            kind.table(),
            field.column(),
            kind.id_column()
        );
        conn.execute(&sql, rusqlite::params![to_sql(value), id.get()])
            .map_err(|e| store_failure("update", kind, e).with_entity_id(id))
    }

    /// Delete one row; only the cascade routines call this
    pub fn delete(conn: &Connection, kind: EntityKind, id: EntityId) -> Result<usize> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1", kind.table(), kind.id_column());
        conn.execute(&sql, [id.get()])
            .map_err(|e| store_failure("delete", kind, e).with_entity_id(id))
    }

    /// Reset `field` to the unset sentinel on every `dependent` row pointing at `referenced`
    pub fn nullify(
        conn: &Connection,
        dependent: EntityKind,
        field: Field,
        referenced: EntityId,
    ) -> Result<usize> {
        let sql = format!(
            "UPDATE {table} SET {col} = 0 WHERE {col} = ?1",
            table = dependent.table(),
            col = field.column()
        );
        conn.execute(&sql, [referenced.get()])
            .map_err(|e| store_failure("nullify", dependent, e).with_entity_id(referenced))
    }

    pub fn get_agent(conn: &Connection, id: EntityId) -> Result<Option<Agent>> {
        conn.query_row(
            "SELECT AgentID, Name, PhoneNumber, Experience FROM Agents WHERE AgentID = ?1",
            [id.get()],
            |row| {
                Ok(Agent {
                    id: EntityId::from_raw(row.get(0)?),
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    phone: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    experience: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                })
            },
        )
        .optional()
        .map_err(|e| store_failure("get", EntityKind::Agent, e).with_entity_id(id))
    }

    pub fn get_customer(conn: &Connection, id: EntityId) -> Result<Option<Customer>> {
        conn.query_row(
            "SELECT CustomerID, AgentID, BookID, Name, PhoneNumber FROM Customers WHERE CustomerID = ?1",
            [id.get()],
            |row| {
                Ok(Customer {
                    id: EntityId::from_raw(row.get(0)?),
                    agent: fk_from_column(row.get::<_, Option<i64>>(1)?.unwrap_or(0)),
                    book: fk_from_column(row.get::<_, Option<i64>>(2)?.unwrap_or(0)),
                    name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    phone: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                })
            },
        )
        .optional()
        .map_err(|e| store_failure("get", EntityKind::Customer, e).with_entity_id(id))
    }

    pub fn get_work_benefit(conn: &Connection, id: EntityId) -> Result<Option<WorkBenefit>> {
        conn.query_row(
            "SELECT BenefitID, AgentID, SalaryBonus, PaidLeaveDuration FROM WorkBenefits WHERE BenefitID = ?1",
            [id.get()],
            |row| {
                Ok(WorkBenefit {
                    id: EntityId::from_raw(row.get(0)?),
                    agent: fk_from_column(row.get::<_, Option<i64>>(1)?.unwrap_or(0)),
                    salary_bonus: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                    paid_leave_days: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                })
            },
        )
        .optional()
        .map_err(|e| store_failure("get", EntityKind::WorkBenefit, e).with_entity_id(id))
    }
}
