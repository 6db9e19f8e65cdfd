//! Policy DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PolicyId;
use domain_policy::{CoverageDetails, Exclusions, Policy};

use super::claims::ClaimResponse;

/// Policy body with the caller's claims against it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyResponse {
    pub id: PolicyId,
    pub policy_number: String,
    pub coverage_details: CoverageDetails,
    pub exclusions: Exclusions,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub document_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub claims: Vec<ClaimResponse>,
}

impl PolicyResponse {
    pub fn new(policy: Policy, claims: Vec<ClaimResponse>) -> Self {
        Self {
            id: policy.id,
            policy_number: policy.policy_number,
            coverage_details: policy.coverage_details,
            exclusions: policy.exclusions,
            start_date: policy.start_date,
            end_date: policy.end_date,
            document_url: policy.document_url,
            created_at: policy.created_at,
            updated_at: policy.updated_at,
            claims,
        }
    }
}
