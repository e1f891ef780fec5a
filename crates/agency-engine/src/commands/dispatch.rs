//! Command Dispatcher
//!
//! Routes a decoded `Command` to the repositories and the integrity engine.
//! No invariant logic lives here; it only sequences calls and assembles the
//! outcome.

use crate::commands::integrity::{
    cascade_delete, refresh_customer_link, resync_agent_benefits, sync_benefits, try_link_salary,
};
use crate::commands::outcome::{CommandOutcome, RegisterOutcome, UpdateOutcome};
use agency_core::model::{EntityId, EntityKind, Field, FieldValue, NewEntity, Relation};
use agency_core::errors::ExError;
use agency_core::{log_op_end, log_op_error, log_op_start, Command};
use agency_core_types::Sensitive;
use agency_store::errors::Result;
use agency_store::{EntityRepo, LinkRepo, ReportRepo};
use rusqlite::Connection;
use std::time::Instant;

/// Apply one command against the store
///
/// Store failures are returned to the caller, which decides whether to
/// report or drop them. Raw statements are the exception: their failure is
/// recorded in the outcome and never returned.
pub fn apply_command(conn: &Connection, cmd: Command) -> Result<CommandOutcome> {
    let op = cmd.op_name();
    let start = Instant::now();
    log_op_start!(op);

    let result = dispatch(conn, cmd);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!(op, *err, duration_ms = duration_ms);
        }
    }
    result.map_err(|e| if e.op().is_none() { e.with_op(op) } else { e })
}

fn dispatch(conn: &Connection, cmd: Command) -> Result<CommandOutcome> {
    match cmd {
        Command::Stop => Ok(CommandOutcome::Stopped),

        Command::RegisterAgent(agent) => {
            tracing::debug!(name = %agent.name, phone = %Sensitive::new(&agent.phone), "new agent");
            let mut outcome = insert(conn, &agent)?;
            let benefit = sync_benefits(conn, outcome.id, agent.experience)
                .map_err(|e| stored_without_follow_up(&outcome, e))?;
            outcome.benefit = Some(benefit);
            Ok(CommandOutcome::Registered(outcome))
        }

        Command::RegisterBook(book) => {
            let mut outcome = insert(conn, &book)?;
            if let Some(author) = book.author {
                let link = LinkRepo::link(conn, Relation::BookAuthor, outcome.id, author)
                    .map_err(|e| stored_without_follow_up(&outcome, e))?;
                outcome.author_link = Some(link);
            }
            Ok(CommandOutcome::Registered(outcome))
        }

        Command::RegisterAuthor(author) => {
            tracing::debug!(name = %author.name, phone = %Sensitive::new(&author.phone), "new author");
            Ok(CommandOutcome::Registered(insert(conn, &author)?))
        }

        Command::RegisterCustomer(customer) => {
            tracing::debug!(
                name = %customer.name,
                phone = %Sensitive::new(&customer.phone),
                "new customer"
            );
            let mut outcome = insert(conn, &customer)?;
            let snapshot = refresh_customer_link(conn, outcome.id)
                .map_err(|e| stored_without_follow_up(&outcome, e))?;
            outcome.snapshot = Some(snapshot);
            Ok(CommandOutcome::Registered(outcome))
        }

        Command::RegisterSalary { salary, link_agent } => {
            let mut outcome = insert(conn, &salary)?;
            if let Some(agent) = link_agent {
                let link = try_link_salary(conn, agent, outcome.id)
                    .map_err(|e| stored_without_follow_up(&outcome, e))?;
                outcome.salary_link = Some(link);
            }
            Ok(CommandOutcome::Registered(outcome))
        }

        Command::Update {
            kind,
            id,
            field,
            value,
        } => update(conn, kind, id, field, value).map(CommandOutcome::Updated),

        Command::Purge { kind, id } => Ok(CommandOutcome::Purged(cascade_delete(conn, kind, id))),

        Command::Display(kind) => ReportRepo::table_view(conn, kind).map(CommandOutcome::Table),
        Command::Compute(kind) => ReportRepo::stats(conn, kind).map(CommandOutcome::Stats),
        Command::Joins(kind) => ReportRepo::join(conn, kind).map(CommandOutcome::Join),

        Command::RawSql(sql) => Ok(match ReportRepo::execute_raw(conn, &sql) {
            Ok(rows_affected) => CommandOutcome::RawSql {
                rows_affected,
                swallowed_error: None,
            },
            Err(err) => {
                tracing::debug!(error = %err, "raw statement failed");
                CommandOutcome::RawSql {
                    rows_affected: 0,
                    swallowed_error: Some(err.message().to_string()),
                }
            }
        }),
    }
}

fn insert(conn: &Connection, entity: &dyn NewEntity) -> Result<RegisterOutcome> {
    let id = EntityRepo::create(conn, entity)?;
    Ok(RegisterOutcome::new(entity.kind(), id))
}

/// The new row stays in the store when a step after the insert fails
fn stored_without_follow_up(outcome: &RegisterOutcome, err: ExError) -> ExError {
    tracing::warn!(
        entity = %outcome.kind,
        id = %outcome.id,
        error = %err,
        "row stored but follow-up step failed"
    );
    let message = format!("{} {} was stored; {}", outcome.kind, outcome.id, err.message());
    err.with_entity_kind(outcome.kind)
        .with_entity_id(outcome.id)
        .with_message(message)
}

/// Side effects only run when the update matched a row
fn update(
    conn: &Connection,
    kind: EntityKind,
    id: EntityId,
    field: Field,
    value: FieldValue,
) -> Result<UpdateOutcome> {
    let rows_affected = EntityRepo::update(conn, kind, id, field, &value)?;
    let mut outcome = UpdateOutcome {
        kind,
        id,
        field,
        rows_affected,
        benefit: None,
        snapshot: None,
    };
    if rows_affected == 0 {
        return Ok(outcome);
    }

    match (kind, field) {
        (EntityKind::Agent, Field::Experience) => {
            outcome.benefit = resync_agent_benefits(conn, id)?;
        }
        (EntityKind::Customer, Field::AgentId | Field::BookId) => {
            outcome.snapshot = Some(refresh_customer_link(conn, id)?);
        }
        _ => {}
    }
    Ok(outcome)
}
