//! Policy handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::{Caller, PolicyId};
use domain_policy::{Policy, PolicyDraft};

use crate::dto::policy::PolicyResponse;
use crate::error::{ApiError, ApiJson};
use crate::handlers::claims::render_claims;
use crate::AppState;

async fn with_claims(state: &AppState, caller: &Caller, policy: Policy) -> Result<PolicyResponse, ApiError> {
    let claims = state.claims.list_by_policy(caller, policy.id).await?;
    let claims = render_claims(state, caller, claims, std::slice::from_ref(&policy)).await?;
    Ok(PolicyResponse::new(policy, claims))
}

/// Lists the caller's policies, each with its claims
pub async fn list_policies(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<PolicyResponse>>, ApiError> {
    let policies = state.policies.list(&caller).await?;
    let claims = render_claims(&state, &caller, state.claims.list(&caller).await?, &policies).await?;

    let responses = policies
        .into_iter()
        .map(|policy| {
            let own = claims.iter().filter(|c| c.policy == policy.id).cloned().collect();
            PolicyResponse::new(policy, own)
        })
        .collect();
    Ok(Json(responses))
}

pub async fn get_policy(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<PolicyId>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state.policies.get(&caller, id).await?;
    Ok(Json(with_claims(&state, &caller, policy).await?))
}

pub async fn create_policy(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(draft): ApiJson<PolicyDraft>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    let policy = state.policies.create(&caller, draft).await?;
    tracing::info!(policy_id = %policy.id, policy_number = %policy.policy_number, "Policy created");
    Ok((StatusCode::CREATED, Json(PolicyResponse::new(policy, Vec::new()))))
}

pub async fn update_policy(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<PolicyId>,
    ApiJson(draft): ApiJson<PolicyDraft>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state.policies.update(&caller, id, draft).await?;
    Ok(Json(with_claims(&state, &caller, policy).await?))
}

/// Deletes the policy and every claim filed against it
pub async fn delete_policy(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<PolicyId>,
) -> Result<StatusCode, ApiError> {
    state.policies.delete(&caller, id).await?;
    tracing::info!(policy_id = %id, "Policy deleted");
    Ok(StatusCode::NO_CONTENT)
}
