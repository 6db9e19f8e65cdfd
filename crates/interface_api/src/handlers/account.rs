//! Registration, login and profile handlers

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use core_kernel::{Caller, PortError};
use domain_party::{RegistrationRequest, User, UserChanges};

use crate::auth::{TokenKind, TokenPair};
use crate::dto::auth::{AccessResponse, LoginRequest, RefreshRequest, RegisteredUser};
use crate::error::{ApiError, ApiJson};
use crate::AppState;

/// Lists the main public routes
pub async fn api_overview() -> Json<BTreeMap<&'static str, &'static str>> {
    Json(BTreeMap::from([
        ("Register", "/api/v1/auth/register"),
        ("Login", "/api/v1/auth/login"),
        ("Refresh Token", "/api/v1/auth/token/refresh"),
        ("User Profile", "/api/v1/auth/profile"),
        ("Items", "/api/v1/items"),
        ("Policies", "/api/v1/policies"),
        ("Medical History", "/api/v1/medical-history"),
        ("Claims", "/api/v1/claims"),
    ]))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegistrationRequest>,
) -> Result<(StatusCode, Json<RegisteredUser>), ApiError> {
    let user = state.accounts.register(request).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges credentials for an access and refresh token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    request.validate().map_err(PortError::from)?;

    let user_id = state
        .accounts
        .authenticate(&request.username, &request.password)
        .await?;
    let pair = state.tokens.issue_pair(user_id, Utc::now())?;

    info!(user_id = %user_id, "User logged in");
    Ok(Json(pair))
}

/// Exchanges a refresh token for a new access token
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<AccessResponse>, ApiError> {
    let claims = state.tokens.validate(&request.refresh, TokenKind::Refresh)?;
    let access = state.tokens.issue(claims.sub, TokenKind::Access, Utc::now())?;
    Ok(Json(AccessResponse { access }))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.get_user(caller.user_id()).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(changes): ApiJson<UserChanges>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.update_user(caller.user_id(), changes).await?))
}
