//! Claim timeline derivation
//!
//! The milestones a claimant sees are synthesized from three stored facts:
//! when the claim was filed, when it was last modified, and its status.
//!
//! ```text
//! created_at ──► +1 day ──► decision ──► +2 days (approved only)
//!  submitted     review     approved /    payment
//!                           rejected /
//!                           pending
//! ```
//!
//! A decision counts as recorded only when the status is decided *and* the
//! claim was modified after filing. Otherwise the decision is projected three
//! days after filing. This means a claim created directly as approved, and
//! never touched since, shows a projected decision date rather than its
//! creation date.
//!
//! `now` is passed in explicitly and only decides whether projected
//! milestones count as completed.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::claim::ClaimStatus;

const REVIEW_AFTER_DAYS: i64 = 1;
const DECISION_PROJECTED_AFTER_DAYS: i64 = 3;
const PAYMENT_AFTER_DAYS: i64 = 2;

/// What happened at a milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Milestone {
    #[serde(rename = "Claim submitted")]
    Submitted,
    #[serde(rename = "Claim received and under review")]
    UnderReview,
    #[serde(rename = "Claim approved")]
    Approved,
    #[serde(rename = "Claim rejected")]
    Rejected,
    #[serde(rename = "Claim decision pending")]
    DecisionPending,
    #[serde(rename = "Payment processed")]
    PaymentProcessed,
}

impl Milestone {
    pub fn label(&self) -> &'static str {
        match self {
            Milestone::Submitted => "Claim submitted",
            Milestone::UnderReview => "Claim received and under review",
            Milestone::Approved => "Claim approved",
            Milestone::Rejected => "Claim rejected",
            Milestone::DecisionPending => "Claim decision pending",
            Milestone::PaymentProcessed => "Payment processed",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who acts at a milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// The submitting user
    #[serde(rename = "You")]
    Claimant,
    #[serde(rename = "Insurance Company")]
    Insurer,
}

/// One milestone in a claim's processing history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Calendar day (UTC) of the milestone
    pub date: NaiveDate,
    pub action: Milestone,
    pub actor: Actor,
    pub completed: bool,
}

impl TimelineEvent {
    fn new(at: DateTime<Utc>, action: Milestone, actor: Actor, completed: bool) -> Self {
        Self {
            date: at.date_naive(),
            action,
            actor,
            completed,
        }
    }
}

/// When the decision happened or is expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decision {
    at: DateTime<Utc>,
    completed: bool,
}

fn decision(
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    status: ClaimStatus,
    now: DateTime<Utc>,
) -> Decision {
    if updated_at > created_at && status.is_decided() {
        Decision {
            at: updated_at,
            completed: true,
        }
    } else {
        let at = created_at + Duration::days(DECISION_PROJECTED_AFTER_DAYS);
        Decision {
            at,
            completed: at <= now,
        }
    }
}

/// Derives the ordered milestones of a claim
///
/// Events come out in a fixed order: submission, review, the decision (or
/// pending marker), then payment for approved claims. No sorting is applied,
/// so a decision recorded within a day of filing is listed after a review
/// dated the following day.
pub fn derive_timeline(
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    status: ClaimStatus,
    now: DateTime<Utc>,
) -> Vec<TimelineEvent> {
    let mut events = Vec::with_capacity(4);

    events.push(TimelineEvent::new(created_at, Milestone::Submitted, Actor::Claimant, true));

    // Review is treated as having happened as soon as the claim exists.
    let review_at = created_at + Duration::days(REVIEW_AFTER_DAYS);
    events.push(TimelineEvent::new(review_at, Milestone::UnderReview, Actor::Insurer, true));

    let decision = decision(created_at, updated_at, status, now);
    match status {
        ClaimStatus::Approved => {
            events.push(TimelineEvent::new(
                decision.at,
                Milestone::Approved,
                Actor::Insurer,
                decision.completed,
            ));
            let payment_at = decision.at + Duration::days(PAYMENT_AFTER_DAYS);
            events.push(TimelineEvent::new(
                payment_at,
                Milestone::PaymentProcessed,
                Actor::Insurer,
                payment_at <= now,
            ));
        }
        ClaimStatus::Rejected => {
            events.push(TimelineEvent::new(
                decision.at,
                Milestone::Rejected,
                Actor::Insurer,
                decision.completed,
            ));
        }
        ClaimStatus::Pending => {
            events.push(TimelineEvent::new(
                decision.at,
                Milestone::DecisionPending,
                Actor::Insurer,
                false,
            ));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_recorded_decision_uses_updated_at() {
        let created = at(2025, 3, 10, 9);
        let updated = at(2025, 3, 11, 15);
        let d = decision(created, updated, ClaimStatus::Rejected, created);
        assert_eq!(d, Decision { at: updated, completed: true });
    }

    #[test]
    fn test_pending_with_later_update_is_still_projected() {
        let created = at(2025, 3, 10, 9);
        let updated = at(2025, 3, 11, 15);
        let d = decision(created, updated, ClaimStatus::Pending, updated);
        assert_eq!(d.at, created + Duration::days(3));
        assert!(!d.completed);
    }

    #[test]
    fn test_review_crosses_month_end() {
        let created = at(2025, 1, 31, 23);
        let events = derive_timeline(created, created, ClaimStatus::Pending, created);
        assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(events[2].date, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
    }

    #[test]
    fn test_milestone_serializes_as_label() {
        let json = serde_json::to_value(Milestone::PaymentProcessed).unwrap();
        assert_eq!(json, "Payment processed");
        assert_eq!(serde_json::to_value(Actor::Claimant).unwrap(), "You");
    }
}
