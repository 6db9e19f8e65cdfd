//! Unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion and display.

use core_kernel::{UserId, PolicyId, ClaimId, DocumentId, MedicalRecordId, ItemId};
use uuid::Uuid;

mod policy_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = PolicyId::new();
        let id2 = PolicyId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = PolicyId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = PolicyId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = PolicyId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = PolicyId::new();
        let parsed: PolicyId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: PolicyId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("POL-not-a-uuid".parse::<PolicyId>().is_err());
    }

    #[test]
    fn test_json_is_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = PolicyId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));

        let back: PolicyId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

mod prefix_tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(UserId::prefix(), "USR");
        assert_eq!(PolicyId::prefix(), "POL");
        assert_eq!(ClaimId::prefix(), "CLM");
        assert_eq!(DocumentId::prefix(), "DOC");
        assert_eq!(MedicalRecordId::prefix(), "MED");
        assert_eq!(ItemId::prefix(), "ITM");
    }

    #[test]
    fn test_display_uses_prefix() {
        assert!(ClaimId::new().to_string().starts_with("CLM-"));
        assert!(DocumentId::new().to_string().starts_with("DOC-"));
        assert!(UserId::new().to_string().starts_with("USR-"));
    }

    #[test]
    fn test_claim_prefix_not_accepted_for_policy() {
        let claim = ClaimId::new();
        assert!(claim.to_string().parse::<PolicyId>().is_err());
    }
}
