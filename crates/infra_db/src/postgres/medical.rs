use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{reveal, Caller, MedicalRecordId, OwnedResource, OwnedResourcePort, PortError};
use domain_party::{MedicalHistoryPort, MedicalRecord, MedicalRecordDraft};

use super::rows::{MedicalRow, MEDICAL_COLUMNS};
use super::scoped::MEDICAL_HISTORY;
use super::PostgresStore;
use crate::error::DatabaseError;

#[async_trait]
impl OwnedResourcePort<MedicalRecord> for PostgresStore {
    type Create = MedicalRecordDraft;
    type Update = MedicalRecordDraft;

    #[instrument(skip(self), fields(caller = %caller))]
    async fn list(&self, caller: &Caller) -> Result<Vec<MedicalRecord>, PortError> {
        let rows: Vec<MedicalRow> = MEDICAL_HISTORY.list(&self.pool, caller).await?;
        Ok(rows.into_iter().map(MedicalRecord::from).collect())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get(&self, caller: &Caller, id: MedicalRecordId) -> Result<MedicalRecord, PortError> {
        let row: Option<MedicalRow> = MEDICAL_HISTORY.get(&self.pool, caller, *id.as_uuid()).await?;
        reveal(caller, id, row.map(MedicalRecord::from))
    }

    #[instrument(skip(self, draft), fields(caller = %caller))]
    async fn create(&self, caller: &Caller, draft: MedicalRecordDraft) -> Result<MedicalRecord, PortError> {
        draft.check()?;
        let record = MedicalRecord::from_draft(caller.user_id(), draft, self.clock.now());

        let sql = format!(
            "INSERT INTO medical_history ({MEDICAL_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        );
        sqlx::query(&sql)
            .bind(record.id.as_uuid())
            .bind(&record.condition)
            .bind(record.diagnosis_date)
            .bind(&record.treatment)
            .bind(record.user_id.as_uuid())
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

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

        let sql = format!(
            "UPDATE medical_history SET \
                condition = $3, diagnosis_date = $4, treatment = $5, \
                updated_at = GREATEST($6, created_at) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {MEDICAL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MedicalRow>(&sql)
            .bind(id.as_uuid())
            .bind(caller.user_id().as_uuid())
            .bind(&draft.condition)
            .bind(draft.diagnosis_date)
            .bind(&draft.treatment)
            .bind(self.clock.now())
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        reveal(caller, id, row.map(MedicalRecord::from))
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn delete(&self, caller: &Caller, id: MedicalRecordId) -> Result<(), PortError> {
        if MEDICAL_HISTORY.delete(&self.pool, caller, *id.as_uuid()).await? {
            Ok(())
        } else {
            Err(PortError::not_found(MedicalRecord::RESOURCE, id))
        }
    }
}

impl MedicalHistoryPort for PostgresStore {}
