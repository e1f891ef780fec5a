//! Integrity Engine: cross-entity rules the store does not enforce
//!
//! - Benefit provisioning: an agent holds exactly one benefit iff its
//!   experience reaches the threshold
//! - At most one salary link per agent; salaries are shared freely
//! - Customer snapshot refresh after any change to its agent or book
//! - Cascade deletes driven by `CascadePlan`, best effort with no rollback

use crate::commands::outcome::{BenefitChange, CascadeReport, SalaryLink, StepFailure};
use agency_core::model::{CustomerSnapshot, EntityId, EntityKind, NewWorkBenefit, Relation};
use agency_core::rules::{
    plan_benefit, BenefitAction, CascadePlan, CascadeStep, DEFAULT_PAID_LEAVE_DAYS,
    DEFAULT_SALARY_BONUS,
};
use agency_store::errors::{not_found, Result};
use agency_store::{EntityRepo, LinkRepo};
use rusqlite::Connection;

/// Bring the agent's benefit in line with `experience`; idempotent
pub fn sync_benefits(conn: &Connection, agent: EntityId, experience: i64) -> Result<BenefitChange> {
    let has_benefit = LinkRepo::has_link(conn, Relation::AgentBenefit, agent)?;

    match plan_benefit(experience, has_benefit) {
        BenefitAction::Grant => {
            let benefit = EntityRepo::create(
                conn,
                &NewWorkBenefit {
                    agent,
                    salary_bonus: DEFAULT_SALARY_BONUS,
                    paid_leave_days: DEFAULT_PAID_LEAVE_DAYS,
                },
            )?;
            LinkRepo::link(conn, Relation::AgentBenefit, agent, benefit)?;
            tracing::debug!(agent_id = agent.get(), benefit_id = benefit.get(), "benefit granted");
            Ok(BenefitChange::Granted { benefit })
        }
        BenefitAction::Revoke => {
            let benefits = LinkRepo::targets_of(conn, Relation::AgentBenefit, agent)?;
            for benefit in &benefits {
                EntityRepo::delete(conn, EntityKind::WorkBenefit, *benefit)?;
            }
            LinkRepo::unlink_all_for_owner(conn, Relation::AgentBenefit, agent)?;
            tracing::debug!(agent_id = agent.get(), count = benefits.len(), "benefit revoked");
            Ok(BenefitChange::Revoked { benefits })
        }
        BenefitAction::Keep => Ok(BenefitChange::Unchanged),
    }
}

/// Re-read the agent's experience and sync its benefit
///
/// Returns `None` when the agent does not exist.
pub fn resync_agent_benefits(conn: &Connection, agent: EntityId) -> Result<Option<BenefitChange>> {
    match EntityRepo::get_agent(conn, agent)? {
        Some(row) => sync_benefits(conn, agent, row.experience).map(Some),
        None => Ok(None),
    }
}

/// Link `salary` to `agent` unless the agent already has a salary
///
/// The agent's existence is not checked; the link is keyed by id only.
pub fn try_link_salary(conn: &Connection, agent: EntityId, salary: EntityId) -> Result<SalaryLink> {
    if LinkRepo::has_link(conn, Relation::AgentSalary, agent)? {
        let existing = LinkRepo::first_target(conn, Relation::AgentSalary, agent)?;
        tracing::debug!(agent_id = agent.get(), salary_id = salary.get(), "salary link declined");
        return Ok(SalaryLink::Declined { existing });
    }

    let link = LinkRepo::link(conn, Relation::AgentSalary, agent, salary)?;
    Ok(SalaryLink::Linked { link })
}

/// Replace the customer's `CustomerAgentBook` rows with one row for its current references
pub fn refresh_customer_link(conn: &Connection, customer: EntityId) -> Result<CustomerSnapshot> {
    let row = EntityRepo::get_customer(conn, customer)?
        .ok_or_else(|| not_found(EntityKind::Customer, customer))?;

    LinkRepo::unlink_all_for_owner(conn, Relation::CustomerAgentBook, customer)?;
    let snapshot = CustomerSnapshot {
        customer,
        agent: row.agent,
        book: row.book,
    };
    LinkRepo::insert_snapshot(conn, &snapshot)?;
    Ok(snapshot)
}

fn run_step(
    conn: &Connection,
    step: &CascadeStep,
    id: EntityId,
    report: &mut CascadeReport,
) -> Result<()> {
    match *step {
        CascadeStep::PurgeLinked {
            relation,
            dependent,
        } => {
            for target in LinkRepo::targets_of(conn, relation, id)? {
                report.dependents_purged += EntityRepo::delete(conn, dependent, target)?;
            }
        }
        CascadeStep::Unlink { relation, by } => {
            report.links_removed += if by == relation.owner() {
                LinkRepo::unlink_all_for_owner(conn, relation, id)?
            } else if by == relation.target() {
                LinkRepo::unlink_all_for_target(conn, relation, id)?
            } else {
                LinkRepo::unlink_by(conn, relation, by, id)?
            };
        }
        CascadeStep::Nullify { dependent, field } => {
            report.rows_nullified += EntityRepo::nullify(conn, dependent, field, id)?;
        }
    }
    Ok(())
}

/// Delete one row after running its cascade plan
///
/// Every step is attempted even if an earlier one failed; failures are
/// collected in the report instead of being returned. The cleanup runs even
/// when the row itself does not exist, so stray link rows are swept too.
pub fn cascade_delete(conn: &Connection, kind: EntityKind, id: EntityId) -> CascadeReport {
    let plan = CascadePlan::for_entity(kind);
    let mut report = CascadeReport::new(kind, id);

    for step in &plan.steps {
        if let Err(err) = run_step(conn, step, id, &mut report) {
            tracing::warn!(
                entity_kind = %kind,
                entity_id = id.get(),
                step = %step.describe(),
                error = %err,
                "cascade step failed"
            );
            report.failures.push(StepFailure {
                step: step.describe(),
                error: err.to_string(),
            });
        }
    }

    match EntityRepo::delete(conn, kind, id) {
        Ok(n) => report.deleted = n > 0,
        Err(err) => report.failures.push(StepFailure {
            step: format!("delete {} row", kind.table()),
            error: err.to_string(),
        }),
    }

    report
}
