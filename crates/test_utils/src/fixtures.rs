//! Pre-built Test Fixtures
//!
//! Ready-to-use drafts for every resource. Fixed values come from the
//! `*Fixtures` helpers; the `random_*` functions use `fake` for tests that
//! only need plausible, distinct data.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::faker::internet::en::{Password, SafeEmail, Username};
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{Caller, PolicyId, UserId};
use domain_catalog::ItemDraft;
use domain_claims::{Attachment, ClaimFields, ClaimStatus, ClaimSubmission};
use domain_party::{MedicalRecordDraft, RegistrationRequest};
use domain_policy::{CoverageDetails, Exclusions, PolicyDraft};

static EPOCH: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Instant test clocks start at (1 March 2025, 09:00 UTC)
    pub fn epoch() -> DateTime<Utc> {
        *EPOCH
    }

    pub fn policy_start() -> DateTime<Utc> {
        Self::epoch()
    }

    /// One year after the policy start
    pub fn policy_end() -> DateTime<Utc> {
        Self::epoch() + Duration::days(365)
    }

    /// Two days before the epoch
    pub fn treatment_date() -> DateTime<Utc> {
        Self::epoch() - Duration::days(2)
    }
}

/// Fixture for callers
pub struct CallerFixtures;

impl CallerFixtures {
    /// A caller with a fresh user id
    pub fn any() -> Caller {
        Caller::new(UserId::new_v7())
    }

    /// Two distinct callers for isolation tests
    pub fn pair() -> (Caller, Caller) {
        (Self::any(), Self::any())
    }
}

/// Fixture for policy drafts
pub struct PolicyFixtures;

impl PolicyFixtures {
    pub fn coverage() -> CoverageDetails {
        CoverageDetails::new()
            .with_item("Hospitalization", "Room", "Up to 5000/day")
            .with_item("Hospitalization", "ICU", "Covered in full")
    }

    pub fn exclusions() -> Exclusions {
        Exclusions::new()
            .with_clause("Hospitalization", "Cosmetic surgery")
            .with_clause("Hospitalization", "Self-inflicted injury")
    }

    /// A valid one-year policy with the given number
    pub fn draft(policy_number: &str) -> PolicyDraft {
        PolicyDraft {
            policy_number: policy_number.to_string(),
            coverage_details: Self::coverage(),
            exclusions: Self::exclusions(),
            start_date: TemporalFixtures::policy_start(),
            end_date: TemporalFixtures::policy_end(),
            document_url: None,
        }
    }

    /// A valid policy with a random, practically unique number
    pub fn random_draft() -> PolicyDraft {
        Self::draft(&random_policy_number())
    }
}

/// Fixture for claim fields and submissions
pub struct ClaimFixtures;

impl ClaimFixtures {
    pub fn amount() -> Decimal {
        dec!(120.50)
    }

    /// A pending claim against the given policy
    pub fn fields(policy_id: PolicyId) -> ClaimFields {
        ClaimFields {
            treatment: "Physiotherapy".to_string(),
            treatment_date: TemporalFixtures::treatment_date(),
            cause: Some("Sprained ankle".to_string()),
            status: ClaimStatus::Pending,
            policy_id,
            treatment_money: Some(Self::amount()),
        }
    }

    pub fn with_status(policy_id: PolicyId, status: ClaimStatus) -> ClaimFields {
        ClaimFields {
            status,
            ..Self::fields(policy_id)
        }
    }

    pub fn submission(policy_id: PolicyId) -> ClaimSubmission {
        ClaimSubmission::new(Self::fields(policy_id))
    }

    /// A submission carrying an inline receipt
    pub fn submission_with_receipt(policy_id: PolicyId) -> ClaimSubmission {
        Self::submission(policy_id).with_attachment(Self::receipt())
    }

    pub fn receipt() -> Attachment {
        Attachment::new("claims/receipt.pdf").with_type("Receipt")
    }
}

/// Fixture for medical history drafts
pub struct MedicalFixtures;

impl MedicalFixtures {
    pub fn draft() -> MedicalRecordDraft {
        MedicalRecordDraft {
            condition: "Asthma".to_string(),
            diagnosis_date: TemporalFixtures::epoch() - Duration::days(3650),
            treatment: Some("Inhaled corticosteroids".to_string()),
        }
    }
}

/// Fixture for account registration
pub struct AccountFixtures;

impl AccountFixtures {
    /// Passes the default password policy for any username
    pub const STRONG_PASSWORD: &'static str = "Xq7!mountain-Lantern";

    pub fn registration(username: &str) -> RegistrationRequest {
        RegistrationRequest {
            username: username.to_string(),
            password: Self::STRONG_PASSWORD.to_string(),
            password2: Self::STRONG_PASSWORD.to_string(),
            email: format!("{username}@example.com"),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        }
    }
}

/// Fixture for catalog items
pub struct ItemFixtures;

impl ItemFixtures {
    pub fn draft(name: &str) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            description: None,
        }
    }
}

/// A policy number in the `POL-XXXXXXXX` form
pub fn random_policy_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("POL-{}", suffix[..8].to_uppercase())
}

/// A registration with fake names and a unique username
pub fn random_registration() -> RegistrationRequest {
    let base: String = Username().fake();
    let username = format!("{}{}", base, &Uuid::new_v4().simple().to_string()[..6]);
    let password = format!("{}-9x!", Password(12..16).fake::<String>());

    RegistrationRequest {
        username,
        password2: password.clone(),
        password,
        email: SafeEmail().fake(),
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
    }
}

/// A medical record draft with a fake condition and treatment
pub fn random_medical_draft() -> MedicalRecordDraft {
    let condition: String = Word().fake();
    MedicalRecordDraft {
        condition,
        diagnosis_date: TemporalFixtures::epoch() - Duration::days((30..3000).fake::<i64>()),
        treatment: Some(Sentence(2..5).fake()),
    }
}

/// An item draft with a fake name and description
pub fn random_item_draft() -> ItemDraft {
    ItemDraft {
        name: Word().fake(),
        description: Some(Sentence(3..8).fake()),
    }
}
