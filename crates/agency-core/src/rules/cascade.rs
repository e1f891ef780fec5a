//! Per-entity cascade plans
//!
//! Deleting a row is described as an ordered list of cleanup steps followed by
//! the delete of the row itself. The engine runs every step independently:
//! a failed step is recorded and the next one still runs.

use crate::model::{EntityKind, Field, Relation};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CascadeStep {
    /// Delete the `dependent` rows reached through `relation` from the purged row
    PurgeLinked {
        relation: Relation,
        dependent: EntityKind,
    },
    /// Delete the rows of `relation` whose `by` column holds the purged id
    Unlink { relation: Relation, by: EntityKind },
    /// Reset `field` of `dependent` rows pointing at the purged id
    Nullify { dependent: EntityKind, field: Field },
}

impl CascadeStep {
    pub fn describe(&self) -> String {
        match self {
            CascadeStep::PurgeLinked {
                relation,
                dependent,
            } => format!("purge {} rows linked via {}", dependent, relation),
            CascadeStep::Unlink { relation, by } => {
                format!("remove {} rows by {}", relation, by)
            }
            CascadeStep::Nullify { dependent, field } => {
                format!("nullify {}.{}", dependent.table(), field)
            }
        }
    }
}

/// Ordered cleanup for one entity kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    pub kind: EntityKind,
    pub steps: Vec<CascadeStep>,
}

impl CascadePlan {
    pub fn for_entity(kind: EntityKind) -> Self {
        use CascadeStep::*;

        let steps = match kind {
            EntityKind::Agent => vec![
                PurgeLinked {
                    relation: Relation::AgentBenefit,
                    dependent: EntityKind::WorkBenefit,
                },
                Unlink {
                    relation: Relation::AgentBenefit,
                    by: EntityKind::Agent,
                },
                Unlink {
                    relation: Relation::AgentSalary,
                    by: EntityKind::Agent,
                },
                Unlink {
                    relation: Relation::CustomerAgentBook,
                    by: EntityKind::Agent,
                },
                Nullify {
                    dependent: EntityKind::Customer,
                    field: Field::AgentId,
                },
            ],
            EntityKind::Book => vec![
                Unlink {
                    relation: Relation::BookAuthor,
                    by: EntityKind::Book,
                },
                Unlink {
                    relation: Relation::CustomerAgentBook,
                    by: EntityKind::Book,
                },
                Nullify {
                    dependent: EntityKind::Customer,
                    field: Field::BookId,
                },
            ],
            EntityKind::Author => vec![
                Unlink {
                    relation: Relation::BookAuthor,
                    by: EntityKind::Author,
                },
                Nullify {
                    dependent: EntityKind::Book,
                    field: Field::AuthorId,
                },
            ],
            EntityKind::Customer => vec![Unlink {
                relation: Relation::CustomerAgentBook,
                by: EntityKind::Customer,
            }],
            EntityKind::Salary => vec![Unlink {
                relation: Relation::AgentSalary,
                by: EntityKind::Salary,
            }],
            EntityKind::WorkBenefit => vec![Unlink {
                relation: Relation::AgentBenefit,
                by: EntityKind::WorkBenefit,
            }],
        };

        Self { kind, steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_plan_purges_benefits_before_unlinking() {
        let plan = CascadePlan::for_entity(EntityKind::Agent);
        assert!(matches!(
            plan.steps[0],
            CascadeStep::PurgeLinked {
                relation: Relation::AgentBenefit,
                dependent: EntityKind::WorkBenefit
            }
        ));
        assert_eq!(
            plan.steps.last(),
            Some(&CascadeStep::Nullify {
                dependent: EntityKind::Customer,
                field: Field::AgentId
            })
        );
        assert_eq!(
            plan.steps[1],
            CascadeStep::Unlink {
                relation: Relation::AgentBenefit,
                by: EntityKind::Agent
            }
        );
    }

    #[test]
    fn test_nullify_targets_reference_the_purged_kind() {
        for kind in EntityKind::ALL {
            for step in CascadePlan::for_entity(kind).steps {
                match step {
                    CascadeStep::Nullify { dependent, field } => {
                        assert!(dependent.has_field(field));
                        assert_eq!(field.references(), Some(kind));
                    }
                    CascadeStep::Unlink { relation, by } => {
                        assert!(relation.column_for(by).is_some());
                        assert_eq!(by, kind);
                    }
                    CascadeStep::PurgeLinked { relation, .. } => {
                        assert_eq!(relation.owner(), kind);
                    }
                }
            }
        }
    }

    #[test]
    fn test_salary_and_customer_plans_only_unlink() {
        for kind in [EntityKind::Salary, EntityKind::Customer] {
            let plan = CascadePlan::for_entity(kind);
            assert_eq!(plan.steps.len(), 1);
            assert!(matches!(plan.steps[0], CascadeStep::Unlink { .. }));
        }
    }

    #[test]
    fn test_describe() {
        let step = CascadeStep::Nullify {
            dependent: EntityKind::Book,
            field: Field::AuthorId,
        };
        assert_eq!(step.describe(), "nullify Books.AuthorID");
    }
}
