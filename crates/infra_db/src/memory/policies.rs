use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{Caller, OwnedResourcePort, PolicyId, PortError};
use domain_policy::{Policy, PolicyDraft, PolicyError, PolicyPort};

use super::InMemoryStore;

#[async_trait]
impl OwnedResourcePort<Policy> for InMemoryStore {
    type Create = PolicyDraft;
    type Update = PolicyDraft;

    #[instrument(skip(self), fields(caller = %caller))]
    async fn list(&self, caller: &Caller) -> Result<Vec<Policy>, PortError> {
        Ok(self.state.read().await.policies.visible(caller))
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get(&self, caller: &Caller, id: PolicyId) -> Result<Policy, PortError> {
        self.state.read().await.policies.get(caller, id)
    }

    #[instrument(skip(self, draft), fields(caller = %caller))]
    async fn create(&self, caller: &Caller, draft: PolicyDraft) -> Result<Policy, PortError> {
        draft.check()?;
        let now = self.clock.now();
        let mut state = self.state.write().await;

        if state.policies.any(|p| p.policy_number == draft.policy_number) {
            return Err(PolicyError::DuplicatePolicyNumber(draft.policy_number).into());
        }

        let policy = Policy::from_draft(caller.user_id(), draft, now);
        state.policies.insert(policy.clone());

        debug!(policy_id = %policy.id, "Policy stored");
        Ok(policy)
    }

    #[instrument(skip(self, draft), fields(caller = %caller))]
    async fn update(&self, caller: &Caller, id: PolicyId, draft: PolicyDraft) -> Result<Policy, PortError> {
        draft.check()?;
        let now = self.clock.now();
        let mut state = self.state.write().await;

        // Ownership first, so a foreign id reports NotFound rather than a conflict.
        state.policies.get(caller, id)?;
        if state
            .policies
            .any(|p| p.id != id && p.policy_number == draft.policy_number)
        {
            return Err(PolicyError::DuplicatePolicyNumber(draft.policy_number).into());
        }

        let policy = state.policies.find_mut(caller, id)?;
        policy.apply(draft, now);
        Ok(policy.clone())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn delete(&self, caller: &Caller, id: PolicyId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        state.policies.remove(caller, id)?;
        let claims = state.claims.remove_where(|c| c.policy_id == id);

        debug!(claims_removed = claims, "Policy deleted");
        Ok(())
    }
}

impl PolicyPort for InMemoryStore {}
