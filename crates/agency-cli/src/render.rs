//! Plain-text rendering of command outcomes
//!
//! Tables print as a header row and data rows, cells separated by ` | `.

use agency_core::model::{Stats, TableView};
use agency_engine::commands::{BenefitChange, CascadeReport, CommandOutcome, SalaryLink};
use agency_engine::commands::{RegisterOutcome, UpdateOutcome};
use agency_engine::{LineOutcome, LineResult};
use std::fmt::Write;

const SEPARATOR: &str = " | ";

pub fn table(view: &TableView) -> String {
    let mut out = view.columns.join(SEPARATOR);
    out.push('\n');
    for row in &view.rows {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        out.push_str(&cells.join(SEPARATOR));
        out.push('\n');
    }
    out
}

fn or_null<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

pub fn stats(stats: &Stats) -> String {
    format!(
        "{} -> MIN: {}  AVG: {}  MAX: {}\n",
        stats.kind.label(),
        or_null(stats.min),
        or_null(stats.avg.map(|avg| format!("{:.2}", avg))),
        or_null(stats.max)
    )
}

fn benefit(out: &mut String, change: &BenefitChange) {
    match change {
        BenefitChange::Granted { .. } => out.push_str("Default work benefits assigned.\n"),
        BenefitChange::Revoked { .. } => out.push_str("Work benefits removed.\n"),
        BenefitChange::Unchanged => {}
    }
}

fn registered(r: &RegisterOutcome) -> String {
    let mut out = format!("{} registered with id {}.\n", r.kind, r.id);
    if let Some(change) = &r.benefit {
        benefit(&mut out, change);
    }
    if r.author_link.is_some() {
        out.push_str("Linked to its author.\n");
    }
    if let Some(snapshot) = &r.snapshot {
        let _ = writeln!(
            out,
            "Linked to agent {} and book {}.",
            or_null(snapshot.agent),
            or_null(snapshot.book)
        );
    }
    match r.salary_link {
        Some(SalaryLink::Linked { .. }) => out.push_str("Salary linked to the agent.\n"),
        Some(SalaryLink::Declined { existing }) => {
            let _ = writeln!(
                out,
                "Agent already has salary {} assigned. Skipping link.",
                or_null(existing)
            );
        }
        None => {}
    }
    out
}

fn updated(u: &UpdateOutcome) -> String {
    if u.rows_affected == 0 {
        return format!("No {} with id {}.\n", u.kind, u.id);
    }
    let mut out = format!("{} {} updated ({}).\n", u.kind, u.id, u.field);
    if let Some(change) = &u.benefit {
        benefit(&mut out, change);
    }
    if u.snapshot.is_some() {
        out.push_str("Customer link refreshed.\n");
    }
    out
}

fn purged(report: &CascadeReport) -> String {
    let mut out = if report.deleted {
        format!("{} {} removed.\n", report.kind, report.id)
    } else {
        format!("No {} with id {}.\n", report.kind, report.id)
    };
    for failure in &report.failures {
        let _ = writeln!(out, "Cleanup step '{}' failed: {}", failure.step, failure.error);
    }
    out
}

pub fn outcome(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Stopped => String::new(),
        CommandOutcome::Registered(r) => registered(r),
        CommandOutcome::Updated(u) => updated(u),
        CommandOutcome::Purged(report) => purged(report),
        CommandOutcome::Table(view) => table(view),
        CommandOutcome::Stats(s) => stats(s),
        CommandOutcome::Join(view) => format!("{}\n{}", view.title, table(view)),
        CommandOutcome::RawSql {
            rows_affected,
            swallowed_error: None,
        } => format!("Statement applied, {} rows changed.\n", rows_affected),
        CommandOutcome::RawSql {
            swallowed_error: Some(error),
            ..
        } => format!("Statement ignored: {}\n", error),
    }
}

/// Echo form of one script line; `None` for comments and blank lines
pub fn line(line: &LineOutcome) -> Option<String> {
    let body = match &line.result {
        LineResult::Noop => return None,
        LineResult::Rejected { message, .. } => format!("skipped: {}\n", message),
        LineResult::Applied { outcome: o } => outcome(o),
        LineResult::StoreFailed { message, .. } => format!("failed: {}\n", message),
        LineResult::Stopped => "stop\n".to_string(),
    };
    Some(format!("[{}] {}\n{}", line.line_no, line.text, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_core::model::{Cell, EntityId, EntityKind, StatKind};

    #[test]
    fn test_table_layout() {
        let mut view = TableView::new("Authors", vec!["AuthorID".into(), "Name".into()]);
        view.rows.push(vec![Cell::Int(1), Cell::Text("Kim".into())]);
        view.rows.push(vec![Cell::Int(2), Cell::Null]);
        assert_eq!(table(&view), "AuthorID | Name\n1 | Kim\n2 | NULL\n");
    }

    #[test]
    fn test_stats_line() {
        let s = Stats {
            kind: StatKind::BookCost,
            count: 3,
            min: Some(10),
            avg: Some(20.0),
            max: Some(30),
        };
        assert_eq!(stats(&s), "Book cost -> MIN: 10  AVG: 20.00  MAX: 30\n");

        let empty = Stats {
            kind: StatKind::SalaryAmount,
            count: 0,
            min: None,
            avg: None,
            max: None,
        };
        assert_eq!(stats(&empty), "Salary -> MIN: NULL  AVG: NULL  MAX: NULL\n");
    }

    #[test]
    fn test_declined_salary_link_message() {
        let mut r = RegisterOutcome::new(EntityKind::Salary, EntityId::from_raw(3));
        r.salary_link = Some(SalaryLink::Declined {
            existing: Some(EntityId::from_raw(2)),
        });
        let text = outcome(&CommandOutcome::Registered(r));
        assert!(text.starts_with("Salary registered with id 3."));
        assert!(text.contains("Agent already has salary 2 assigned"));
    }

    #[test]
    fn test_update_of_missing_row() {
        let u = UpdateOutcome {
            kind: EntityKind::Book,
            id: EntityId::from_raw(8),
            field: agency_core::model::Field::Cost,
            rows_affected: 0,
            benefit: None,
            snapshot: None,
        };
        assert_eq!(outcome(&CommandOutcome::Updated(u)), "No Book with id 8.\n");
    }
}
