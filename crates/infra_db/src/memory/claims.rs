use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{Caller, ClaimId, DocumentId, OwnedResourcePort, PolicyId, PortError};
use domain_claims::{
    Attachment, Claim, ClaimError, ClaimFields, ClaimPort, ClaimSubmission, Document,
};

use super::{InMemoryStore, MemoryState};

impl MemoryState {
    /// Fails unless the policy exists and belongs to the caller
    fn require_policy(&self, caller: &Caller, policy_id: PolicyId) -> Result<(), PortError> {
        match self.policies.get(caller, policy_id) {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(ClaimError::PolicyNotAvailable(policy_id).into()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl OwnedResourcePort<Claim> for InMemoryStore {
    type Create = ClaimSubmission;
    type Update = ClaimFields;

    #[instrument(skip(self), fields(caller = %caller))]
    async fn list(&self, caller: &Caller) -> Result<Vec<Claim>, PortError> {
        Ok(self.state.read().await.claims.visible(caller))
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get(&self, caller: &Caller, id: ClaimId) -> Result<Claim, PortError> {
        self.state.read().await.claims.get(caller, id)
    }

    #[instrument(skip(self, submission), fields(caller = %caller))]
    async fn create(&self, caller: &Caller, submission: ClaimSubmission) -> Result<Claim, PortError> {
        submission.check()?;
        let now = self.clock.now();
        let mut state = self.state.write().await;
        state.require_policy(caller, submission.fields.policy_id)?;

        let mut claim = Claim::file(caller.user_id(), submission.fields, now);
        if let Some(attachment) = submission.attachment {
            claim.attach(attachment, now);
        }
        state.claims.insert(claim.clone());

        debug!(claim_id = %claim.id, documents = claim.documents.len(), "Claim stored");
        Ok(claim)
    }

    #[instrument(skip(self, changes), fields(caller = %caller))]
    async fn update(&self, caller: &Caller, id: ClaimId, changes: ClaimFields) -> Result<Claim, PortError> {
        changes.check()?;
        let now = self.clock.now();
        let mut state = self.state.write().await;

        state.claims.get(caller, id)?;
        state.require_policy(caller, changes.policy_id)?;

        let claim = state.claims.find_mut(caller, id)?;
        claim.apply(changes, now);
        Ok(claim.clone())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn delete(&self, caller: &Caller, id: ClaimId) -> Result<(), PortError> {
        let removed = self.state.write().await.claims.remove(caller, id)?;
        debug!(documents_removed = removed.documents.len(), "Claim deleted");
        Ok(())
    }
}

#[async_trait]
impl ClaimPort for InMemoryStore {
    #[instrument(skip(self), fields(caller = %caller))]
    async fn list_by_policy(&self, caller: &Caller, policy_id: PolicyId) -> Result<Vec<Claim>, PortError> {
        let state = self.state.read().await;
        state.policies.get(caller, policy_id)?;
        Ok(state.claims.visible_where(caller, |c| c.policy_id == policy_id))
    }

    #[instrument(skip(self, attachment), fields(caller = %caller))]
    async fn add_document(
        &self,
        caller: &Caller,
        claim_id: ClaimId,
        attachment: Attachment,
    ) -> Result<Document, PortError> {
        attachment.check()?;
        let now = self.clock.now();
        let mut state = self.state.write().await;

        let claim = state.claims.find_mut(caller, claim_id)?;
        let document = claim.attach(attachment, now).clone();

        debug!(document_id = %document.id, "Document attached");
        Ok(document)
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn list_documents(&self, caller: &Caller, claim_id: ClaimId) -> Result<Vec<Document>, PortError> {
        let claim = self.state.read().await.claims.get(caller, claim_id)?;
        Ok(claim.documents)
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn delete_document(
        &self,
        caller: &Caller,
        claim_id: ClaimId,
        document_id: DocumentId,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        let claim = state.claims.find_mut(caller, claim_id)?;

        let index = claim
            .documents
            .iter()
            .position(|d| d.id == document_id)
            .ok_or(ClaimError::DocumentNotFound { claim_id, document_id })?;
        claim.documents.remove(index);
        Ok(())
    }
}
