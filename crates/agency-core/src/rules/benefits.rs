//! Experience-triggered work benefit policy

/// Minimum years of experience that entitle an agent to a work benefit
pub const BENEFIT_EXPERIENCE_THRESHOLD: i64 = 10;

/// Salary bonus recorded on a provisioned benefit
pub const DEFAULT_SALARY_BONUS: i64 = 0;

/// Paid leave (days) recorded on a provisioned benefit
pub const DEFAULT_PAID_LEAVE_DAYS: i64 = 14;

pub fn qualifies(experience: i64) -> bool {
    experience >= BENEFIT_EXPERIENCE_THRESHOLD
}

/// What has to happen to bring an agent's benefit in line with its experience
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenefitAction {
    /// Create a WorkBenefit and link it
    Grant,
    /// Delete the linked WorkBenefit and the link
    Revoke,
    /// Already consistent
    Keep,
}

pub fn plan_benefit(experience: i64, has_benefit: bool) -> BenefitAction {
    match (qualifies(experience), has_benefit) {
        (true, false) => BenefitAction::Grant,
        (false, true) => BenefitAction::Revoke,
        _ => BenefitAction::Keep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(!qualifies(9));
        assert!(qualifies(10));
        assert!(qualifies(40));
    }

    #[test]
    fn test_decision_table() {
        assert_eq!(plan_benefit(12, false), BenefitAction::Grant);
        assert_eq!(plan_benefit(12, true), BenefitAction::Keep);
        assert_eq!(plan_benefit(3, true), BenefitAction::Revoke);
        assert_eq!(plan_benefit(3, false), BenefitAction::Keep);
    }
}
