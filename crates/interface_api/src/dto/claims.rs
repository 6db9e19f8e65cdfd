//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, PolicyId};
use domain_claims::{
    Attachment, Claim, ClaimFields, ClaimStatus, ClaimSubmission, Document, TimelineEvent,
};
use domain_party::User;

/// Claim create/update body
///
/// `document_url` and `document_type` are only honoured on create, where they
/// attach one document to the new claim.
#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub treatment: String,
    pub treatment_date: DateTime<Utc>,
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub status: ClaimStatus,
    pub policy: PolicyId,
    #[serde(default)]
    pub treatment_money: Option<Decimal>,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
}

impl ClaimRequest {
    pub fn fields(&self) -> ClaimFields {
        ClaimFields {
            treatment: self.treatment.clone(),
            treatment_date: self.treatment_date,
            cause: self.cause.clone(),
            status: self.status,
            policy_id: self.policy,
            treatment_money: self.treatment_money,
        }
    }

    pub fn into_submission(self) -> ClaimSubmission {
        let submission = ClaimSubmission::new(self.fields());
        match self.document_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                let attachment = match self.document_type {
                    Some(kind) => Attachment::new(url).with_type(kind),
                    None => Attachment::new(url),
                };
                submission.with_attachment(attachment)
            }
            None => submission,
        }
    }
}

/// Claim body with its derived timeline and display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub treatment: String,
    pub treatment_date: DateTime<Utc>,
    pub cause: Option<String>,
    pub status: ClaimStatus,
    pub treatment_money: Option<Decimal>,
    pub policy: PolicyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub documents: Vec<Document>,
    pub policy_number: String,
    pub policy_provider: String,
    pub policy_holder_name: String,
    pub incident_date: DateTime<Utc>,
    pub incident_description: Option<String>,
    pub claim_details: String,
    pub timeline: Vec<TimelineEvent>,
}

/// What a claim response needs beyond the claim itself
pub struct ClaimContext<'a> {
    pub holder: &'a User,
    pub provider: &'a str,
    pub now: DateTime<Utc>,
}

impl ClaimResponse {
    pub fn build(claim: Claim, policy_number: &str, ctx: &ClaimContext<'_>) -> Self {
        Self {
            policy_number: policy_number.to_string(),
            policy_provider: ctx.provider.to_string(),
            policy_holder_name: ctx.holder.full_name(),
            incident_date: claim.treatment_date,
            incident_description: claim.cause.clone(),
            claim_details: claim.summary(),
            timeline: claim.timeline(ctx.now),
            id: claim.id,
            treatment: claim.treatment,
            treatment_date: claim.treatment_date,
            cause: claim.cause,
            status: claim.status,
            treatment_money: claim.treatment_money,
            policy: claim.policy_id,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
            documents: claim.documents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(extra: serde_json::Value) -> ClaimRequest {
        let mut body = json!({
            "treatment": "Surgery",
            "treatment_date": "2025-02-02T00:00:00Z",
            "cause": "Accident",
            "policy": PolicyId::new_v7(),
            "treatment_money": "500.00"
        });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let fields = request(json!({})).fields();
        assert_eq!(fields.status, ClaimStatus::Pending);
        assert_eq!(fields.treatment_money, Some(Decimal::new(50000, 2)));
    }

    #[test]
    fn test_inline_document_uses_default_type() {
        let submission = request(json!({"document_url": "https://example.com/doc.jpg"})).into_submission();
        let attachment = submission.attachment.unwrap();
        assert_eq!(attachment.file_path, "https://example.com/doc.jpg");
        assert_eq!(attachment.resolved_type(), domain_claims::DEFAULT_DOCUMENT_TYPE);
    }

    #[test]
    fn test_inline_document_keeps_given_type() {
        let submission = request(json!({
            "document_url": "https://example.com/doc.jpg",
            "document_type": "Test Doc"
        }))
        .into_submission();
        assert_eq!(submission.attachment.unwrap().resolved_type(), "Test Doc");
    }

    #[test]
    fn test_blank_document_url_attaches_nothing() {
        assert!(request(json!({"document_url": ""})).into_submission().attachment.is_none());
        assert!(request(json!({})).into_submission().attachment.is_none());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let body = json!({
            "treatment": "Surgery",
            "treatment_date": "2025-02-02T00:00:00Z",
            "status": "paid",
            "policy": PolicyId::new_v7()
        });
        assert!(serde_json::from_value::<ClaimRequest>(body).is_err());
    }
}
