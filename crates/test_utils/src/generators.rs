//! Property-Based Test Generators
//!
//! proptest strategies for claim data that stays within validation limits.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::PolicyId;
use domain_claims::{ClaimFields, ClaimStatus};

use crate::fixtures::TemporalFixtures;

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
    ]
}

/// Instants within roughly two years after the fixture epoch
pub fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..2 * 365 * 24 * 60).prop_map(|minutes| TemporalFixtures::epoch() + Duration::minutes(minutes))
}

/// Non-negative amounts with two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Valid claim fields against the given policy
pub fn claim_fields_strategy(policy_id: PolicyId) -> impl Strategy<Value = ClaimFields> {
    (
        "[A-Za-z][A-Za-z ]{0,40}",
        instant_strategy(),
        proptest::option::of("[a-z ]{1,60}"),
        claim_status_strategy(),
        proptest::option::of(amount_strategy()),
    )
        .prop_map(move |(treatment, treatment_date, cause, status, treatment_money)| ClaimFields {
            treatment,
            treatment_date,
            cause,
            status,
            policy_id,
            treatment_money,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_generated_claim_fields_validate(fields in claim_fields_strategy(PolicyId::new_v7())) {
            prop_assert!(fields.check().is_ok());
        }

        #[test]
        fn prop_amounts_have_two_places(amount in amount_strategy()) {
            prop_assert!(amount.scale() == 2);
            prop_assert!(amount >= Decimal::ZERO);
        }
    }
}
