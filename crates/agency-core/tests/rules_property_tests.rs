#![allow(clippy::unwrap_used, clippy::expect_used)]

use agency_core::model::parse_non_negative;
use agency_core::rules::{plan_benefit, qualifies, BenefitAction};
use agency_core::{parse_line, tokenize, AgencyError, Command, Tokenized};
use proptest::prelude::*;

fn arb_field_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 #.\\-]{0,12}"
}

proptest! {
    /// Applying the planned action always lands on the state the threshold asks for
    #[test]
    fn benefit_plan_reaches_desired_state(experience in 0i64..60, has_benefit in any::<bool>()) {
        let after = match plan_benefit(experience, has_benefit) {
            BenefitAction::Grant => true,
            BenefitAction::Revoke => false,
            BenefitAction::Keep => has_benefit,
        };
        prop_assert_eq!(after, qualifies(experience));
    }

    /// Re-planning from the reached state is a no-op
    #[test]
    fn benefit_plan_is_idempotent(experience in 0i64..60, has_benefit in any::<bool>()) {
        let after = match plan_benefit(experience, has_benefit) {
            BenefitAction::Grant => true,
            BenefitAction::Revoke => false,
            BenefitAction::Keep => has_benefit,
        };
        prop_assert_eq!(plan_benefit(experience, after), BenefitAction::Keep);
    }

    #[test]
    fn tokenizer_field_count_is_delimiters_plus_one(
        fields in prop::collection::vec(arb_field_text(), 1..8)
    ) {
        // Lead with a code so the line is never blank or a comment
        let mut all = vec!["1".to_string()];
        all.extend(fields);
        let line = all.join("|");
        match tokenize(&line) {
            Tokenized::Fields(out) => {
                prop_assert_eq!(out.len(), line.matches('|').count() + 1);
                for f in &out {
                    prop_assert!(!f.starts_with(' ') && !f.ends_with(' '));
                }
            }
            Tokenized::Noop => prop_assert!(false, "unexpected no-op for {:?}", line),
        }
    }

    #[test]
    fn digits_always_parse(value in 0u32..u32::MAX) {
        prop_assert_eq!(parse_non_negative("Cost", &value.to_string()), Ok(i64::from(value)));
    }

    #[test]
    fn negative_numbers_are_rejected(value in i64::MIN..0) {
        let is_invalid = matches!(
            parse_non_negative("Cost", &value.to_string()),
            Err(AgencyError::InvalidNumeric { .. })
        );
        prop_assert!(is_invalid);
    }

    /// Register-agent lines decode exactly when the experience field is numeric
    #[test]
    fn register_agent_decodes_with_numeric_experience(
        name in "[A-Za-z]{1,8}",
        phone in "[0-9\\-]{0,10}",
        experience in 0i64..100,
    ) {
        let line = format!("1|1|{}|{}|{}", name, phone, experience);
        match parse_line(&line) {
            Ok(Some(Command::RegisterAgent(agent))) => {
                prop_assert_eq!(agent.name, name);
                prop_assert_eq!(agent.experience, experience);
            }
            other => prop_assert!(false, "unexpected decode result {:?}", other),
        }
    }
}
