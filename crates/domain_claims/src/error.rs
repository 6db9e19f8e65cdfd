//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimId, DocumentId, PolicyId, PortError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),

    /// The referenced policy does not exist or belongs to someone else
    #[error("Invalid policy {0} - object does not exist")]
    PolicyNotAvailable(PolicyId),

    #[error("Document {document_id} not found on claim {claim_id}")]
    DocumentNotFound {
        claim_id: ClaimId,
        document_id: DocumentId,
    },
}

impl From<ClaimError> for PortError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::UnknownStatus(_) => PortError::validation_field("status", err.to_string()),
            ClaimError::PolicyNotAvailable(_) => PortError::validation_field("policy", err.to_string()),
            ClaimError::DocumentNotFound { document_id, .. } => {
                PortError::not_found("Document", document_id)
            }
        }
    }
}
