//! Tests for the policy aggregate and draft validation

use chrono::{Duration, TimeZone, Utc};

use core_kernel::{Caller, OwnedResource, UserId};
use domain_policy::{CoverageDetails, Exclusions, Policy, PolicyDraft};

fn draft(number: &str) -> PolicyDraft {
    PolicyDraft {
        policy_number: number.to_string(),
        coverage_details: CoverageDetails::new()
            .with_item("Hospitalization", "Room", "Up to 5000/day")
            .with_item("Hospitalization", "Surgery", "Covered in full"),
        exclusions: Exclusions::new().with_clause("Hospitalization", "Cosmetic surgery"),
        start_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        document_url: None,
    }
}

mod draft_validation {
    use super::*;

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft("POL-001-2025").check().is_ok());
    }

    #[test]
    fn test_blank_policy_number_rejected() {
        let err = draft("").check().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field_errors()[0].field, "policy_number");
    }

    #[test]
    fn test_overlong_policy_number_rejected() {
        let err = draft(&"P".repeat(101)).check().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "policy_number");
    }

    #[test]
    fn test_document_url_must_be_url() {
        let mut d = draft("POL-002");
        d.document_url = Some("not a url".to_string());
        let err = d.check().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "document_url");

        d.document_url = Some("https://files.example.com/policy.pdf".to_string());
        assert!(d.check().is_ok());
    }

    #[test]
    fn test_overlong_document_url_rejected() {
        let mut d = draft("POL-004");
        let path = "a".repeat(180);
        d.document_url = Some(format!("https://files.example.com/{path}.pdf"));

        let err = d.check().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "document_url");
    }

    #[test]
    fn test_end_before_start_is_not_enforced() {
        let mut d = draft("POL-003");
        d.end_date = d.start_date - Duration::days(30);
        assert!(d.check().is_ok());
    }

    #[test]
    fn test_draft_deserializes_nested_terms() {
        let json = serde_json::json!({
            "policy_number": "POL123",
            "coverage_details": { "Dental": { "Cleaning": "Twice a year" } },
            "exclusions": { "Dental": ["Implants", "Whitening"] },
            "start_date": "2025-01-01T00:00:00Z",
            "end_date": "2026-01-01T00:00:00Z"
        });
        let d: PolicyDraft = serde_json::from_value(json).unwrap();
        assert_eq!(d.coverage_details.terms("Dental", "Cleaning"), Some("Twice a year"));
        assert_eq!(d.exclusions.clauses("Dental").len(), 2);
        assert_eq!(d.document_url, None);
    }
}

mod aggregate {
    use super::*;

    #[test]
    fn test_from_draft_sets_owner_and_timestamps() {
        let owner = UserId::new_v7();
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let policy = Policy::from_draft(owner, draft("POL-100"), now);

        assert_eq!(policy.owner(), owner);
        assert_eq!(policy.created_at, now);
        assert_eq!(policy.updated_at, now);
        assert!(policy.is_visible_to(&Caller::new(owner)));
        assert!(!policy.is_visible_to(&Caller::new(UserId::new_v7())));
    }

    #[test]
    fn test_apply_keeps_identity_and_bumps_updated_at() {
        let owner = UserId::new_v7();
        let created = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let mut policy = Policy::from_draft(owner, draft("POL-200"), created);
        let id = policy.id;

        policy.apply(draft("POL-200-UPDATED"), created + Duration::hours(1));

        assert_eq!(policy.id, id);
        assert_eq!(policy.policy_number, "POL-200-UPDATED");
        assert_eq!(policy.created_at, created);
        assert_eq!(policy.updated_at, created + Duration::hours(1));
    }

    #[test]
    fn test_apply_never_moves_updated_before_created() {
        let created = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let mut policy = Policy::from_draft(UserId::new_v7(), draft("POL-300"), created);

        policy.apply(draft("POL-300"), created - Duration::days(1));

        assert_eq!(policy.updated_at, created);
    }

    #[test]
    fn test_in_force_window() {
        let policy = Policy::from_draft(UserId::new_v7(), draft("POL-400"), Utc::now());
        assert!(policy.is_in_force(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()));
        assert!(!policy.is_in_force(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()));
        assert!(!policy.is_in_force(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()));
    }
}
