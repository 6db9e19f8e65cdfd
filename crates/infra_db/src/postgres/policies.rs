use async_trait::async_trait;
use sqlx::types::Json;
use tracing::{debug, instrument};

use core_kernel::{reveal, Caller, OwnedResource, OwnedResourcePort, PolicyId, PortError};
use domain_policy::{Policy, PolicyDraft, PolicyError, PolicyPort};

use super::rows::{PolicyRow, POLICY_COLUMNS};
use super::scoped::POLICIES;
use super::PostgresStore;
use crate::error::DatabaseError;

const POLICY_NUMBER_CONSTRAINT: &str = "policies_policy_number_key";

fn number_conflict(error: sqlx::Error, policy_number: &str) -> PortError {
    let error = DatabaseError::from(error);
    if error.is_unique_violation(POLICY_NUMBER_CONSTRAINT) {
        PolicyError::DuplicatePolicyNumber(policy_number.to_string()).into()
    } else {
        error.into()
    }
}

#[async_trait]
impl OwnedResourcePort<Policy> for PostgresStore {
    type Create = PolicyDraft;
    type Update = PolicyDraft;

    #[instrument(skip(self), fields(caller = %caller))]
    async fn list(&self, caller: &Caller) -> Result<Vec<Policy>, PortError> {
        let rows: Vec<PolicyRow> = POLICIES.list(&self.pool, caller).await?;
        Ok(rows.into_iter().map(Policy::from).collect())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn get(&self, caller: &Caller, id: PolicyId) -> Result<Policy, PortError> {
        let row: Option<PolicyRow> = POLICIES.get(&self.pool, caller, *id.as_uuid()).await?;
        reveal(caller, id, row.map(Policy::from))
    }

    #[instrument(skip(self, draft), fields(caller = %caller))]
    async fn create(&self, caller: &Caller, draft: PolicyDraft) -> Result<Policy, PortError> {
        draft.check()?;
        let policy = Policy::from_draft(caller.user_id(), draft, self.clock.now());

        let sql = format!(
            "INSERT INTO policies ({POLICY_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {POLICY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(policy.id.as_uuid())
            .bind(&policy.policy_number)
            .bind(Json(&policy.coverage_details))
            .bind(Json(&policy.exclusions))
            .bind(policy.start_date)
            .bind(policy.end_date)
            .bind(&policy.document_url)
            .bind(policy.user_id.as_uuid())
            .bind(policy.created_at)
            .bind(policy.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| number_conflict(e, &policy.policy_number))?;

        debug!(policy_id = %policy.id, "Policy stored");
        Ok(row.into())
    }

    #[instrument(skip(self, draft), fields(caller = %caller))]
    async fn update(&self, caller: &Caller, id: PolicyId, draft: PolicyDraft) -> Result<Policy, PortError> {
        draft.check()?;

        let sql = format!(
            "UPDATE policies SET \
                policy_number = $3, coverage_details = $4, exclusions = $5, \
                start_date = $6, end_date = $7, document_url = $8, \
                updated_at = GREATEST($9, created_at) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {POLICY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(id.as_uuid())
            .bind(caller.user_id().as_uuid())
            .bind(&draft.policy_number)
            .bind(Json(&draft.coverage_details))
            .bind(Json(&draft.exclusions))
            .bind(draft.start_date)
            .bind(draft.end_date)
            .bind(&draft.document_url)
            .bind(self.clock.now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| number_conflict(e, &draft.policy_number))?;

        reveal(caller, id, row.map(Policy::from))
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn delete(&self, caller: &Caller, id: PolicyId) -> Result<(), PortError> {
        if POLICIES.delete(&self.pool, caller, *id.as_uuid()).await? {
            debug!("Policy deleted with its claims");
            Ok(())
        } else {
            Err(PortError::not_found(Policy::RESOURCE, id))
        }
    }
}

impl PolicyPort for PostgresStore {}
