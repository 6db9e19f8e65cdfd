//! Tests for claim field validation

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::PolicyId;
use domain_claims::{ClaimFields, ClaimStatus};

fn fields_with(amount: Option<Decimal>) -> ClaimFields {
    ClaimFields {
        treatment: "Physiotherapy".to_string(),
        treatment_date: Utc.with_ymd_and_hms(2025, 2, 27, 10, 0, 0).unwrap(),
        cause: Some("Sprained ankle".to_string()),
        status: ClaimStatus::Pending,
        policy_id: PolicyId::new_v7(),
        treatment_money: amount,
    }
}

fn money_error(amount: Decimal) -> bool {
    match fields_with(Some(amount)).check() {
        Ok(()) => false,
        Err(e) => e.field_errors().iter().any(|f| f.field == "treatment_money"),
    }
}

mod treatment_money {
    use super::*;

    #[test]
    fn test_absent_amount_is_valid() {
        assert!(fields_with(None).check().is_ok());
    }

    #[test]
    fn test_cents_are_valid() {
        assert!(fields_with(Some(dec!(120.50))).check().is_ok());
        assert!(fields_with(Some(dec!(0))).check().is_ok());
    }

    #[test]
    fn test_largest_storable_amount_is_valid() {
        assert!(fields_with(Some(dec!(9999999999.99))).check().is_ok());
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        assert!(fields_with(Some(dec!(75.5000))).check().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(money_error(dec!(-1.00)));
    }

    #[test]
    fn test_sub_cent_precision_rejected() {
        assert!(money_error(dec!(10.005)));
    }

    #[test]
    fn test_too_many_integer_digits_rejected() {
        assert!(money_error(dec!(10000000000)));
        assert!(money_error(dec!(123456789012345.6789)));
    }

    #[test]
    fn test_error_reported_once_with_other_fields() {
        let mut fields = fields_with(Some(dec!(1.234)));
        fields.treatment = String::new();

        let error = fields.check().unwrap_err();
        let names: Vec<_> = error.field_errors().iter().map(|f| f.field.as_str()).collect();

        assert!(names.contains(&"treatment"));
        assert_eq!(names.iter().filter(|n| **n == "treatment_money").count(), 1);
    }
}
