//! Item resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ItemId, PortError};

/// A catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied item fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ItemDraft {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemDraft {
    pub fn check(&self) -> Result<(), PortError> {
        self.validate().map_err(PortError::from)
    }
}

impl Item {
    pub fn from_draft(draft: ItemDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new_v7(),
            name: draft.name,
            description: draft.description,
            created_at: now,
        }
    }

    pub fn apply(&mut self, draft: ItemDraft) {
        self.name = draft.name;
        self.description = draft.description;
    }
}
