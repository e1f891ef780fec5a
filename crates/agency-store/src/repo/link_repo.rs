//! Relationship Manager: rows of the four link tables
//!
//! Inserts are unconditional. Cardinality rules (one salary, one benefit per
//! agent) are checked by the engine with [`LinkRepo::has_link`] first.

use crate::errors::Result;
use agency_core::errors::{ExError, ExErrorKind};
use agency_core::model::{fk_from_column, fk_to_column, CustomerSnapshot, EntityId, EntityKind, Relation};
use rusqlite::{Connection, OptionalExtension};

fn link_failure(op: &str, relation: Relation, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(op)
        .with_message(format!("{} on {}: {}", op, relation, err))
}

pub struct LinkRepo;

impl LinkRepo {
    /// Insert one `(owner, target)` row and return its `Link` id
    ///
    /// For `CustomerAgentBook` use [`LinkRepo::insert_snapshot`], which also
    /// writes the book column.
    pub fn link(
        conn: &Connection,
        relation: Relation,
        owner: EntityId,
        target: EntityId,
    ) -> Result<EntityId> {
        let sql = format!(
            "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
            relation.table(),
            relation.owner_column(),
            relation.target_column()
        );
        conn.execute(&sql, [owner.get(), target.get()])
            .map_err(|e| link_failure("link", relation, e))?;
        Ok(EntityId::from_raw(conn.last_insert_rowid()))
    }

    /// Remove every row owned by `owner`
    pub fn unlink_all_for_owner(
        conn: &Connection,
        relation: Relation,
        owner: EntityId,
    ) -> Result<usize> {
        Self::unlink_by(conn, relation, relation.owner(), owner)
    }

    /// Remove every row pointing at `target`
    pub fn unlink_all_for_target(
        conn: &Connection,
        relation: Relation,
        target: EntityId,
    ) -> Result<usize> {
        Self::unlink_by(conn, relation, relation.target(), target)
    }

    /// Remove every row whose `kind` column holds `id`
    ///
    /// Returns 0 without touching the store when `kind` does not take part
    /// in `relation`.
    pub fn unlink_by(
        conn: &Connection,
        relation: Relation,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<usize> {
        let Some(column) = relation.column_for(kind) else {
            return Ok(0);
        };
        let sql = format!("DELETE FROM {} WHERE {} = ?1", relation.table(), column);
        conn.execute(&sql, [id.get()])
            .map_err(|e| link_failure("unlink", relation, e))
    }

    /// Whether `owner` has at least one row in `relation`
    pub fn has_link(conn: &Connection, relation: Relation, owner: EntityId) -> Result<bool> {
        let sql = format!(
            "SELECT 1 FROM {} WHERE {} = ?1 LIMIT 1",
            relation.table(),
            relation.owner_column()
        );
        conn.query_row(&sql, [owner.get()], |_| Ok(()))
            .optional()
            .map(|found| found.is_some())
            .map_err(|e| link_failure("has_link", relation, e))
    }

    /// Target ids linked from `owner`, oldest link first
    pub fn targets_of(
        conn: &Connection,
        relation: Relation,
        owner: EntityId,
    ) -> Result<Vec<EntityId>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY Link",
            relation.target_column(),
            relation.table(),
            relation.owner_column()
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| link_failure("targets_of", relation, e))?;
        let raw = stmt
            .query_map([owner.get()], |row| row.get::<_, Option<i64>>(0))
            .map_err(|e| link_failure("targets_of", relation, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| link_failure("targets_of", relation, e))?;
        Ok(raw
            .into_iter()
            .filter_map(|v| fk_from_column(v.unwrap_or(0)))
            .collect())
    }

    /// First target linked from `owner`, if any
    pub fn first_target(
        conn: &Connection,
        relation: Relation,
        owner: EntityId,
    ) -> Result<Option<EntityId>> {
        Ok(Self::targets_of(conn, relation, owner)?.into_iter().next())
    }

    /// Number of rows owned by `owner`
    pub fn count_for_owner(conn: &Connection, relation: Relation, owner: EntityId) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?1",
            relation.table(),
            relation.owner_column()
        );
        conn.query_row(&sql, [owner.get()], |r| r.get(0))
            .map_err(|e| link_failure("count", relation, e))
    }

    /// Insert a `CustomerAgentBook` row; unset references are written as 0
    pub fn insert_snapshot(conn: &Connection, snapshot: &CustomerSnapshot) -> Result<EntityId> {
        conn.execute(
            "INSERT INTO CustomerAgentBook (CustomerID, AgentID, BookID) VALUES (?1, ?2, ?3)",
            [
                snapshot.customer.get(),
                fk_to_column(snapshot.agent),
                fk_to_column(snapshot.book),
            ],
        )
        .map_err(|e| link_failure("insert_snapshot", Relation::CustomerAgentBook, e))?;
        Ok(EntityId::from_raw(conn.last_insert_rowid()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_migrated;

    fn id(raw: i64) -> EntityId {
        EntityId::from_raw(raw)
    }

    #[test]
    fn test_link_and_has_link() {
        let conn = open_in_memory_migrated().unwrap();
        assert!(!LinkRepo::has_link(&conn, Relation::AgentSalary, id(1)).unwrap());

        LinkRepo::link(&conn, Relation::AgentSalary, id(1), id(2)).unwrap();
        assert!(LinkRepo::has_link(&conn, Relation::AgentSalary, id(1)).unwrap());
        assert_eq!(
            LinkRepo::first_target(&conn, Relation::AgentSalary, id(1)).unwrap(),
            Some(id(2))
        );
    }

    #[test]
    fn test_link_does_not_enforce_cardinality() {
        let conn = open_in_memory_migrated().unwrap();
        LinkRepo::link(&conn, Relation::BookAuthor, id(1), id(2)).unwrap();
        LinkRepo::link(&conn, Relation::BookAuthor, id(1), id(3)).unwrap();
        assert_eq!(
            LinkRepo::count_for_owner(&conn, Relation::BookAuthor, id(1)).unwrap(),
            2
        );
    }

    #[test]
    fn test_unlink_by_owner_and_target() {
        let conn = open_in_memory_migrated().unwrap();
        LinkRepo::link(&conn, Relation::AgentSalary, id(1), id(5)).unwrap();
        LinkRepo::link(&conn, Relation::AgentSalary, id(2), id(5)).unwrap();
        LinkRepo::link(&conn, Relation::AgentSalary, id(3), id(6)).unwrap();

        assert_eq!(
            LinkRepo::unlink_all_for_target(&conn, Relation::AgentSalary, id(5)).unwrap(),
            2
        );
        assert_eq!(
            LinkRepo::unlink_all_for_owner(&conn, Relation::AgentSalary, id(3)).unwrap(),
            1
        );
        assert_eq!(
            LinkRepo::unlink_by(&conn, Relation::AgentSalary, EntityKind::Book, id(3)).unwrap(),
            0
        );
    }

    #[test]
    fn test_snapshot_round_trip_keeps_unset() {
        let conn = open_in_memory_migrated().unwrap();
        let snapshot = CustomerSnapshot {
            customer: id(4),
            agent: Some(id(7)),
            book: None,
        };
        LinkRepo::insert_snapshot(&conn, &snapshot).unwrap();

        let raw_book: i64 = conn
            .query_row("SELECT BookID FROM CustomerAgentBook WHERE CustomerID = 4", [], |r| r.get(0))
            .unwrap();
        assert_eq!(raw_book, 0);
        assert_eq!(
            LinkRepo::targets_of(&conn, Relation::CustomerAgentBook, id(4)).unwrap(),
            vec![id(7)]
        );

        assert_eq!(
            LinkRepo::unlink_by(&conn, Relation::CustomerAgentBook, EntityKind::Agent, id(7)).unwrap(),
            1
        );
    }
}
