//! Medical history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{MedicalRecordId, OwnedResource, PortError, UserId};

/// A diagnosed condition in a user's medical history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: MedicalRecordId,
    pub condition: String,
    pub diagnosis_date: DateTime<Utc>,
    pub treatment: Option<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied medical record fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MedicalRecordDraft {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub condition: String,
    pub diagnosis_date: DateTime<Utc>,
    pub treatment: Option<String>,
}

impl MedicalRecordDraft {
    pub fn check(&self) -> Result<(), PortError> {
        self.validate().map_err(PortError::from)
    }
}

impl MedicalRecord {
    pub fn from_draft(owner: UserId, draft: MedicalRecordDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: MedicalRecordId::new_v7(),
            condition: draft.condition,
            diagnosis_date: draft.diagnosis_date,
            treatment: draft.treatment,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: MedicalRecordDraft, now: DateTime<Utc>) {
        self.condition = draft.condition;
        self.diagnosis_date = draft.diagnosis_date;
        self.treatment = draft.treatment;
        self.updated_at = now.max(self.created_at);
    }
}

impl OwnedResource for MedicalRecord {
    type Id = MedicalRecordId;
    const RESOURCE: &'static str = "MedicalHistory";

    fn id(&self) -> MedicalRecordId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.user_id
    }
}
