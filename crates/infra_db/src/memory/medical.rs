use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{Caller, MedicalRecordId, OwnedResourcePort, PortError};
use domain_party::{MedicalHistoryPort, MedicalRecord, MedicalRecordDraft};

use super::InMemoryStore;

#[async_trait]
impl OwnedResourcePort<MedicalRecord> for InMemoryStore {
    type Create = MedicalRecordDraft;
    type Update = MedicalRecordDraft;

    #[instrument(skip(self), fields(caller = %caller))]
    async fn list(&self, caller: &Caller) -> Result<Vec<MedicalRecord>, PortError> {
        Ok(self.state.read().await.medical_history.visible(caller))
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get(&self, caller: &Caller, id: MedicalRecordId) -> Result<MedicalRecord, PortError> {
        self.state.read().await.medical_history.get(caller, id)
    }

    #[instrument(skip(self, draft), fields(caller = %caller))]
    async fn create(&self, caller: &Caller, draft: MedicalRecordDraft) -> Result<MedicalRecord, PortError> {
        draft.check()?;
        let record = MedicalRecord::from_draft(caller.user_id(), draft, self.clock.now());
        self.state.write().await.medical_history.insert(record.clone());

        debug!(record_id = %record.id, "Medical record stored");
        Ok(record)
    }

    #[instrument(skip(self, draft), fields(caller = %caller))]
    async fn update(
        &self,
        caller: &Caller,
        id: MedicalRecordId,
        draft: MedicalRecordDraft,
    ) -> Result<MedicalRecord, PortError> {
        draft.check()?;
        let now = self.clock.now();
        let mut state = self.state.write().await;

        let record = state.medical_history.find_mut(caller, id)?;
        record.apply(draft, now);
        Ok(record.clone())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn delete(&self, caller: &Caller, id: MedicalRecordId) -> Result<(), PortError> {
        self.state.write().await.medical_history.remove(caller, id)?;
        Ok(())
    }
}

impl MedicalHistoryPort for InMemoryStore {}
