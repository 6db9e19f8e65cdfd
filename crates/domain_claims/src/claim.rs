//! Claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, FieldError, OwnedResource, PolicyId, PortError, UserId};

use crate::document::{Attachment, Document};
use crate::error::ClaimError;
use crate::timeline::{derive_timeline, TimelineEvent};

/// Claim status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Awaiting a decision
    #[default]
    Pending,
    /// Accepted for payment
    Approved,
    /// Declined
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Whether a decision has been recorded
    pub fn is_decided(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(ClaimError::UnknownStatus(other.to_string())),
        }
    }
}

/// Decimal places kept for `treatment_money`
pub const AMOUNT_SCALE: u32 = 2;

/// Number of integer digits allowed in `treatment_money`
pub const AMOUNT_INTEGER_DIGITS: u32 = 10;

/// Whether `amount` fits a `NUMERIC(12, 2)` column without rounding
fn amount_fits(amount: Decimal) -> bool {
    let limit = Decimal::from(10_i64.pow(AMOUNT_INTEGER_DIGITS));
    amount.normalize().scale() <= AMOUNT_SCALE && amount.abs() < limit
}

/// Client-supplied claim fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClaimFields {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub treatment: String,
    pub treatment_date: DateTime<Utc>,
    /// Incident description
    pub cause: Option<String>,
    #[serde(default)]
    pub status: ClaimStatus,
    /// Policy the claim is filed against; must belong to the caller
    pub policy_id: PolicyId,
    pub treatment_money: Option<Decimal>,
}

impl ClaimFields {
    pub fn check(&self) -> Result<(), PortError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => PortError::from(e).field_errors().to_vec(),
        };
        if let Some(amount) = self.treatment_money {
            if amount.is_sign_negative() {
                errors.push(FieldError::new("treatment_money", "may not be negative"));
            } else if !amount_fits(amount) {
                errors.push(FieldError::new(
                    "treatment_money",
                    format!(
                        "must have at most {AMOUNT_INTEGER_DIGITS} digits before and \
                         {AMOUNT_SCALE} after the decimal point"
                    ),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::invalid_fields(errors))
        }
    }
}

/// Input for filing a claim, optionally with one inline document
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimSubmission {
    pub fields: ClaimFields,
    pub attachment: Option<Attachment>,
}

impl ClaimSubmission {
    pub fn new(fields: ClaimFields) -> Self {
        Self {
            fields,
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Validates the claim fields and the attachment together
    pub fn check(&self) -> Result<(), PortError> {
        let mut errors = self
            .fields
            .check()
            .err()
            .map(|e| e.field_errors().to_vec())
            .unwrap_or_default();
        if let Some(attachment) = &self.attachment {
            if let Err(e) = attachment.check() {
                errors.extend(e.field_errors().iter().cloned());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::invalid_fields(errors))
        }
    }
}

/// A claim against a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub treatment: String,
    pub treatment_date: DateTime<Utc>,
    pub cause: Option<String>,
    pub status: ClaimStatus,
    pub treatment_money: Option<Decimal>,
    pub policy_id: PolicyId,
    /// Owner; always the owner of `policy_id`
    pub user_id: UserId,
    /// Set once at filing
    pub created_at: DateTime<Utc>,
    /// Bumped on every mutation, never earlier than `created_at`
    pub updated_at: DateTime<Utc>,
    pub documents: Vec<Document>,
}

impl Claim {
    /// Files a new claim for `owner`
    pub fn file(owner: UserId, fields: ClaimFields, now: DateTime<Utc>) -> Self {
        Self {
            id: ClaimId::new_v7(),
            treatment: fields.treatment,
            treatment_date: fields.treatment_date,
            cause: fields.cause,
            status: fields.status,
            treatment_money: fields.treatment_money,
            policy_id: fields.policy_id,
            user_id: owner,
            created_at: now,
            updated_at: now,
            documents: Vec::new(),
        }
    }

    /// Replaces the mutable fields and bumps `updated_at`
    pub fn apply(&mut self, fields: ClaimFields, now: DateTime<Utc>) {
        self.treatment = fields.treatment;
        self.treatment_date = fields.treatment_date;
        self.cause = fields.cause;
        self.status = fields.status;
        self.treatment_money = fields.treatment_money;
        self.policy_id = fields.policy_id;
        self.touch(now);
    }

    /// Attaches a document to this claim
    pub fn attach(&mut self, attachment: Attachment, now: DateTime<Utc>) -> &Document {
        let index = self.documents.len();
        self.documents.push(Document::attach(self.id, attachment, now));
        &self.documents[index]
    }

    /// Records a mutation time, keeping `updated_at >= created_at`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    /// One-line description: `"Treatment: {treatment}. {cause}"`
    pub fn summary(&self) -> String {
        format!(
            "Treatment: {}. {}",
            self.treatment,
            self.cause.as_deref().unwrap_or("")
        )
    }

    /// Processing history as of `now`
    pub fn timeline(&self, now: DateTime<Utc>) -> Vec<TimelineEvent> {
        derive_timeline(self.created_at, self.updated_at, self.status, now)
    }
}

impl OwnedResource for Claim {
    type Id = ClaimId;
    const RESOURCE: &'static str = "Claim";

    fn id(&self) -> ClaimId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.user_id
    }
}
