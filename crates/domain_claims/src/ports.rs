//! Claim storage port

use async_trait::async_trait;

use core_kernel::{Caller, ClaimId, DocumentId, OwnedResourcePort, PolicyId, PortError};

use crate::claim::{Claim, ClaimFields, ClaimSubmission};
use crate::document::{Attachment, Document};

/// Caller-scoped claim storage
///
/// `create` persists the claim and its inline attachment, if any, as one
/// atomic unit: either both exist afterwards or neither does. Create and
/// update fail with a validation error on `policy` unless the referenced
/// policy belongs to the caller. Deleting a claim deletes its documents.
#[async_trait]
pub trait ClaimPort: OwnedResourcePort<Claim, Create = ClaimSubmission, Update = ClaimFields> {
    /// Lists the caller's claims filed against one of the caller's policies
    async fn list_by_policy(&self, caller: &Caller, policy_id: PolicyId) -> Result<Vec<Claim>, PortError>;

    /// Attaches a document to one of the caller's claims
    async fn add_document(
        &self,
        caller: &Caller,
        claim_id: ClaimId,
        attachment: Attachment,
    ) -> Result<Document, PortError>;

    /// Lists the documents of one of the caller's claims
    async fn list_documents(&self, caller: &Caller, claim_id: ClaimId) -> Result<Vec<Document>, PortError>;

    /// Removes a document from one of the caller's claims
    async fn delete_document(
        &self,
        caller: &Caller,
        claim_id: ClaimId,
        document_id: DocumentId,
    ) -> Result<(), PortError>;
}
