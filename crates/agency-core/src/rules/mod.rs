//! Pure business rules; the engine applies them against the store

pub mod benefits;
pub mod cascade;

pub use benefits::{
    plan_benefit, qualifies, BenefitAction, BENEFIT_EXPERIENCE_THRESHOLD, DEFAULT_PAID_LEAVE_DAYS,
    DEFAULT_SALARY_BONUS,
};
pub use cascade::{CascadePlan, CascadeStep};
