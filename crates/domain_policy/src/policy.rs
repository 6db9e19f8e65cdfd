//! Policy aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{OwnedResource, PolicyId, PortError, UserId};

use crate::coverage::{CoverageDetails, Exclusions};

/// An insurance policy owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier
    pub id: PolicyId,
    /// Human-readable policy number, unique across all users
    pub policy_number: String,
    /// Coverage items per policy-type label
    pub coverage_details: CoverageDetails,
    /// Exclusion clauses per policy-type label
    pub exclusions: Exclusions,
    /// Start of the validity window
    pub start_date: DateTime<Utc>,
    /// End of the validity window (expected after start, not enforced)
    pub end_date: DateTime<Utc>,
    /// Link to the policy document
    pub document_url: Option<String>,
    /// Owning user
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied policy fields, used for both create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PolicyDraft {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub policy_number: String,
    #[serde(default)]
    pub coverage_details: CoverageDetails,
    #[serde(default)]
    pub exclusions: Exclusions,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(
        url(message = "must be a valid URL"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub document_url: Option<String>,
}

impl PolicyDraft {
    /// Validates field formats and the structure of coverage/exclusion terms
    pub fn check(&self) -> Result<(), PortError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => PortError::from(e).field_errors().to_vec(),
        };
        self.coverage_details.check(&mut errors);
        self.exclusions.check(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::invalid_fields(errors))
        }
    }
}

impl Policy {
    /// Builds a new policy for `owner` from a validated draft
    pub fn from_draft(owner: UserId, draft: PolicyDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: PolicyId::new_v7(),
            policy_number: draft.policy_number,
            coverage_details: draft.coverage_details,
            exclusions: draft.exclusions,
            start_date: draft.start_date,
            end_date: draft.end_date,
            document_url: draft.document_url,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the mutable fields, keeping id, owner and creation time
    pub fn apply(&mut self, draft: PolicyDraft, now: DateTime<Utc>) {
        self.policy_number = draft.policy_number;
        self.coverage_details = draft.coverage_details;
        self.exclusions = draft.exclusions;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.document_url = draft.document_url;
        self.updated_at = now.max(self.created_at);
    }

    /// Whether the validity window contains `at`
    pub fn is_in_force(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at < self.end_date
    }
}

impl OwnedResource for Policy {
    type Id = PolicyId;
    const RESOURCE: &'static str = "Policy";

    fn id(&self) -> PolicyId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.user_id
    }
}
