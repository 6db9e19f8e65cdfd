//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::{Caller, ClaimId, DocumentId};
use domain_claims::{Attachment, Claim, Document};
use domain_policy::Policy;

use crate::dto::claims::{ClaimContext, ClaimRequest, ClaimResponse};
use crate::error::{ApiError, ApiJson};
use crate::AppState;

/// Builds claim responses, taking policy numbers from `policies`
pub(crate) async fn render_claims(
    state: &AppState,
    caller: &Caller,
    claims: Vec<Claim>,
    policies: &[Policy],
) -> Result<Vec<ClaimResponse>, ApiError> {
    if claims.is_empty() {
        return Ok(Vec::new());
    }

    let holder = state.users.get_user(caller.user_id()).await?;
    let ctx = ClaimContext {
        holder: &holder,
        provider: &state.config.provider_name,
        now: state.clock.now(),
    };

    Ok(claims
        .into_iter()
        .map(|claim| {
            let number = policies
                .iter()
                .find(|p| p.id == claim.policy_id)
                .map(|p| p.policy_number.as_str())
                .unwrap_or_default();
            ClaimResponse::build(claim, number, &ctx)
        })
        .collect())
}

async fn render_one(state: &AppState, caller: &Caller, claim: Claim) -> Result<ClaimResponse, ApiError> {
    let policy = state.policies.get(caller, claim.policy_id).await?;
    render_claims(state, caller, vec![claim], std::slice::from_ref(&policy))
        .await?
        .pop()
        .ok_or_else(|| ApiError::Internal("claim rendering produced no output".to_string()))
}

/// Lists the caller's claims
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.list(&caller).await?;
    let policies = state.policies.list(&caller).await?;
    Ok(Json(render_claims(&state, &caller, claims, &policies).await?))
}

/// Gets one of the caller's claims with its timeline
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<ClaimId>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.get(&caller, id).await?;
    Ok(Json(render_one(&state, &caller, claim).await?))
}

/// Files a claim, attaching the inline document if one was given
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(request): ApiJson<ClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state.claims.create(&caller, request.into_submission()).await?;
    tracing::info!(claim_id = %claim.id, policy_id = %claim.policy_id, "Claim filed");
    Ok((StatusCode::CREATED, Json(render_one(&state, &caller, claim).await?)))
}

/// Replaces the claim fields; inline document fields are ignored
pub async fn update_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<ClaimId>,
    ApiJson(request): ApiJson<ClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.update(&caller, id, request.fields()).await?;
    tracing::info!(claim_id = %claim.id, status = %claim.status, "Claim updated");
    Ok(Json(render_one(&state, &caller, claim).await?))
}

pub async fn delete_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<ClaimId>,
) -> Result<StatusCode, ApiError> {
    state.claims.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_documents(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<ClaimId>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.claims.list_documents(&caller, id).await?))
}

pub async fn add_document(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<ClaimId>,
    ApiJson(attachment): ApiJson<Attachment>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let document = state.claims.add_document(&caller, id, attachment).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path((id, document_id)): Path<(ClaimId, DocumentId)>,
) -> Result<StatusCode, ApiError> {
    state.claims.delete_document(&caller, id, document_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
