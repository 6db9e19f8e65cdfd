use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgExecutor};
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    reveal, Caller, ClaimId, DocumentId, OwnedResource, OwnedResourcePort, PolicyId, PortError,
};
use domain_claims::{
    Attachment, Claim, ClaimError, ClaimFields, ClaimPort, ClaimSubmission, Document,
};
use domain_policy::Policy;

use super::rows::{ClaimRow, DocumentRow, CLAIM_COLUMNS, DOCUMENT_COLUMNS};
use super::scoped::{CLAIMS, POLICIES};
use super::PostgresStore;
use crate::error::DatabaseError;

/// Loads the documents of the given claims, grouped by claim
async fn documents_for<'e>(
    executor: impl PgExecutor<'e>,
    claim_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Vec<Document>>, DatabaseError> {
    let sql = format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE claim_id = ANY($1) ORDER BY created_at, id"
    );
    let rows = sqlx::query_as::<_, DocumentRow>(&sql)
        .bind(claim_ids)
        .fetch_all(executor)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<Document>> = HashMap::new();
    for row in rows {
        grouped.entry(row.claim_id).or_default().push(row.into());
    }
    Ok(grouped)
}

/// Attaches each claim's documents, keeping the row order
async fn hydrate(store: &PostgresStore, rows: Vec<ClaimRow>) -> Result<Vec<Claim>, DatabaseError> {
    let ids = rows.iter().map(|r| r.id).collect();
    let mut documents = documents_for(&store.pool, ids).await?;

    rows.into_iter()
        .map(|row| {
            let docs = documents.remove(&row.id).unwrap_or_default();
            row.into_claim(docs)
        })
        .collect()
}

/// Fails unless the policy exists and belongs to the caller
async fn require_policy(
    conn: &mut PgConnection,
    caller: &Caller,
    policy_id: PolicyId,
) -> Result<(), PortError> {
    if POLICIES.exists(conn, caller, *policy_id.as_uuid()).await? {
        Ok(())
    } else {
        Err(ClaimError::PolicyNotAvailable(policy_id).into())
    }
}

async fn insert_document(conn: &mut PgConnection, document: &Document) -> Result<(), DatabaseError> {
    let sql = format!("INSERT INTO documents ({DOCUMENT_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)");
    sqlx::query(&sql)
        .bind(document.id.as_uuid())
        .bind(document.claim_id.as_uuid())
        .bind(&document.document_type)
        .bind(&document.file_path)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl OwnedResourcePort<Claim> for PostgresStore {
    type Create = ClaimSubmission;
    type Update = ClaimFields;

    #[instrument(skip(self), fields(caller = %caller))]
    async fn list(&self, caller: &Caller) -> Result<Vec<Claim>, PortError> {
        let rows: Vec<ClaimRow> = CLAIMS.list(&self.pool, caller).await?;
        Ok(hydrate(self, rows).await?)
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get(&self, caller: &Caller, id: ClaimId) -> Result<Claim, PortError> {
        let row: Option<ClaimRow> = CLAIMS.get(&self.pool, caller, *id.as_uuid()).await?;
        let claim = match row {
            Some(row) => hydrate(self, vec![row]).await?.pop(),
            None => None,
        };
        reveal(caller, id, claim)
    }

    /// Inserts the claim and its inline document in one transaction
    #[instrument(skip(self, submission), fields(caller = %caller))]
    async fn create(&self, caller: &Caller, submission: ClaimSubmission) -> Result<Claim, PortError> {
        submission.check()?;
        let now = self.clock.now();

        let mut claim = Claim::file(caller.user_id(), submission.fields, now);
        if let Some(attachment) = submission.attachment {
            claim.attach(attachment, now);
        }

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        require_policy(&mut tx, caller, claim.policy_id).await?;

        let sql = format!(
            "INSERT INTO claims ({CLAIM_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"
        );
        sqlx::query(&sql)
            .bind(claim.id.as_uuid())
            .bind(&claim.treatment)
            .bind(claim.treatment_date)
            .bind(&claim.cause)
            .bind(claim.status.as_str())
            .bind(claim.treatment_money)
            .bind(claim.user_id.as_uuid())
            .bind(claim.policy_id.as_uuid())
            .bind(claim.created_at)
            .bind(claim.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        for document in &claim.documents {
            insert_document(&mut tx, document).await?;
        }

        tx.commit().await.map_err(DatabaseError::from)?;

        debug!(claim_id = %claim.id, documents = claim.documents.len(), "Claim stored");
        Ok(claim)
    }

    #[instrument(skip(self, changes), fields(caller = %caller))]
    async fn update(&self, caller: &Caller, id: ClaimId, changes: ClaimFields) -> Result<Claim, PortError> {
        changes.check()?;
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let existing: Option<ClaimRow> = CLAIMS.get_for_update(&mut *tx, caller, *id.as_uuid()).await?;
        if existing.is_none() {
            return Err(PortError::not_found(Claim::RESOURCE, id));
        }
        require_policy(&mut tx, caller, changes.policy_id).await?;

        let sql = format!(
            "UPDATE claims SET \
                treatment = $3, treatment_date = $4, cause = $5, status = $6, \
                treatment_money = $7, policy_id = $8, \
                updated_at = GREATEST($9, created_at) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {CLAIM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id.as_uuid())
            .bind(caller.user_id().as_uuid())
            .bind(&changes.treatment)
            .bind(changes.treatment_date)
            .bind(&changes.cause)
            .bind(changes.status.as_str())
            .bind(changes.treatment_money)
            .bind(changes.policy_id.as_uuid())
            .bind(self.clock.now())
            .fetch_one(&mut *tx)
            .await
            .map_err(DatabaseError::from)?;

        let mut documents = documents_for(&mut *tx, vec![row.id]).await?;
        tx.commit().await.map_err(DatabaseError::from)?;

        let docs = documents.remove(&row.id).unwrap_or_default();
        Ok(row.into_claim(docs)?)
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn delete(&self, caller: &Caller, id: ClaimId) -> Result<(), PortError> {
        if CLAIMS.delete(&self.pool, caller, *id.as_uuid()).await? {
            debug!("Claim deleted with its documents");
            Ok(())
        } else {
            Err(PortError::not_found(Claim::RESOURCE, id))
        }
    }
}

#[async_trait]
impl ClaimPort for PostgresStore {
    #[instrument(skip(self), fields(caller = %caller))]
    async fn list_by_policy(&self, caller: &Caller, policy_id: PolicyId) -> Result<Vec<Claim>, PortError> {
        if !POLICIES.exists(&self.pool, caller, *policy_id.as_uuid()).await? {
            return Err(PortError::not_found(Policy::RESOURCE, policy_id));
        }
        let rows: Vec<ClaimRow> = CLAIMS
            .list_where(&self.pool, caller, "policy_id", *policy_id.as_uuid())
            .await?;
        Ok(hydrate(self, rows).await?)
    }

    #[instrument(skip(self, attachment), fields(caller = %caller))]
    async fn add_document(
        &self,
        caller: &Caller,
        claim_id: ClaimId,
        attachment: Attachment,
    ) -> Result<Document, PortError> {
        attachment.check()?;
        let document = Document::attach(claim_id, attachment, self.clock.now());

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        let claim: Option<ClaimRow> = CLAIMS.get_for_update(&mut *tx, caller, *claim_id.as_uuid()).await?;
        if claim.is_none() {
            return Err(PortError::not_found(Claim::RESOURCE, claim_id));
        }
        insert_document(&mut tx, &document).await?;
        tx.commit().await.map_err(DatabaseError::from)?;

        debug!(document_id = %document.id, "Document attached");
        Ok(document)
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn list_documents(&self, caller: &Caller, claim_id: ClaimId) -> Result<Vec<Document>, PortError> {
        if !CLAIMS.exists(&self.pool, caller, *claim_id.as_uuid()).await? {
            return Err(PortError::not_found(Claim::RESOURCE, claim_id));
        }
        let mut documents = documents_for(&self.pool, vec![*claim_id.as_uuid()]).await?;
        Ok(documents.remove(claim_id.as_uuid()).unwrap_or_default())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn delete_document(
        &self,
        caller: &Caller,
        claim_id: ClaimId,
        document_id: DocumentId,
    ) -> Result<(), PortError> {
        if !CLAIMS.exists(&self.pool, caller, *claim_id.as_uuid()).await? {
            return Err(PortError::not_found(Claim::RESOURCE, claim_id));
        }

        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND claim_id = $2")
            .bind(document_id.as_uuid())
            .bind(claim_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(ClaimError::DocumentNotFound { claim_id, document_id }.into());
        }
        Ok(())
    }
}
