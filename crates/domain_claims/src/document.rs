//! Supporting documents
//!
//! Only a reference (URL or storage path) is kept; the file itself lives
//! elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, DocumentId, PortError};

/// Type recorded when an attachment does not name one
pub const DEFAULT_DOCUMENT_TYPE: &str = "Supporting Document";

/// A document attached to a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub claim_id: ClaimId,
    pub document_type: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn attach(claim_id: ClaimId, attachment: Attachment, now: DateTime<Utc>) -> Self {
        let document_type = attachment.resolved_type().to_string();
        Self {
            id: DocumentId::new_v7(),
            claim_id,
            document_type,
            file_path: attachment.file_path,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A document reference to attach to a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Attachment {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub file_path: String,
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub document_type: Option<String>,
}

impl Attachment {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            document_type: None,
        }
    }

    pub fn with_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    /// The given type, or [`DEFAULT_DOCUMENT_TYPE`]
    pub fn resolved_type(&self) -> &str {
        self.document_type.as_deref().unwrap_or(DEFAULT_DOCUMENT_TYPE)
    }

    pub fn check(&self) -> Result<(), PortError> {
        self.validate().map_err(PortError::from)
    }
}
