//! Read-only queries behind display, compute and joins, plus raw passthrough

use crate::errors::{from_rusqlite, Result};
use agency_core::model::{Cell, EntityKind, JoinKind, StatKind, Stats, TableView};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

fn cell(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Integer(v) => Cell::Int(v),
        ValueRef::Real(v) => Cell::Real(v),
        ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Cell::Text(format!("x'{}'", hex::encode(bytes))),
    }
}

fn collect_view(conn: &Connection, sql: &str, mut view: TableView) -> Result<TableView> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let width = stmt.column_count();
    let mut rows = stmt.query([]).map_err(from_rusqlite)?;
    while let Some(row) = rows.next().map_err(from_rusqlite)? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            cells.push(cell(row.get_ref(i).map_err(from_rusqlite)?));
        }
        view.rows.push(cells);
    }
    Ok(view)
}

pub struct ReportRepo;

impl ReportRepo {
    /// Every row of one entity table in id order
    pub fn table_view(conn: &Connection, kind: EntityKind) -> Result<TableView> {
        let columns = kind.columns();
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            columns.join(", "),
            kind.table(),
            kind.id_column()
        );
        let view = TableView::new(
            kind.table(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        collect_view(conn, &sql, view).map_err(|e| e.with_op("display").with_entity_kind(kind))
    }

    /// MIN/AVG/MAX over one numeric column
    pub fn stats(conn: &Connection, kind: StatKind) -> Result<Stats> {
        let (table, column) = kind.source();
        let sql = format!(
            "SELECT COUNT({col}), MIN({col}), AVG({col}), MAX({col}) FROM {table}",
            col = column,
            table = table
        );
        conn.query_row(&sql, [], |row| {
            Ok(Stats {
                kind,
                count: row.get(0)?,
                min: row.get(1)?,
                avg: row.get(2)?,
                max: row.get(3)?,
            })
        })
        .map_err(|e| from_rusqlite(e).with_op("compute"))
    }

    /// One of the fixed joined listings
    pub fn join(conn: &Connection, kind: JoinKind) -> Result<TableView> {
        let sql = match kind {
            JoinKind::CustomerAgent => {
                "SELECT Customers.CustomerID, Customers.Name, Agents.AgentID, Agents.Name
                 FROM Customers LEFT JOIN Agents ON Customers.AgentID = Agents.AgentID
                 ORDER BY Customers.CustomerID"
            }
            JoinKind::AgentBenefit => {
                "SELECT Agents.AgentID, Agents.Name, WorkBenefits.SalaryBonus, WorkBenefits.PaidLeaveDuration
                 FROM Agents JOIN WorkBenefits ON Agents.AgentID = WorkBenefits.AgentID
                 ORDER BY Agents.AgentID, WorkBenefits.BenefitID"
            }
            JoinKind::AgentSalary => {
                "SELECT Agents.AgentID, Agents.Name, Salaries.Salary, Salaries.Experience
                 FROM Agents
                 JOIN AgentSalary ON Agents.AgentID = AgentSalary.AgentID
                 JOIN Salaries ON AgentSalary.SalaryID = Salaries.SalaryID
                 ORDER BY Agents.AgentID, AgentSalary.Link"
            }
        };
        let view = TableView::new(
            kind.title(),
            kind.columns().iter().map(|c| c.to_string()).collect(),
        );
        collect_view(conn, sql, view).map_err(|e| e.with_op("joins"))
    }

    /// Hand a statement straight to the store; returns rows changed by it
    ///
    /// Queries and schema statements change no rows and report 0.
    pub fn execute_raw(conn: &Connection, sql: &str) -> Result<usize> {
        let before = total_changes(conn)?;
        conn.execute_batch(sql)
            .map_err(|e| from_rusqlite(e).with_op("raw_sql"))?;
        let after = total_changes(conn)?;
        Ok(after.saturating_sub(before) as usize)
    }
}

fn total_changes(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT total_changes()", [], |r| r.get(0))
        .map_err(|e| from_rusqlite(e).with_op("raw_sql"))
}
