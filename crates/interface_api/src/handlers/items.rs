//! Item handlers
//!
//! Items are public: no token is required and every client sees every item.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::ItemId;
use domain_catalog::{Item, ItemDraft};

use crate::error::{ApiError, ApiJson};
use crate::AppState;

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.items.list_items().await?))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.items.get_item(id).await?))
}

pub async fn create_item(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ItemDraft>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    Ok((StatusCode::CREATED, Json(state.items.create_item(draft).await?)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    ApiJson(draft): ApiJson<ItemDraft>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.items.update_item(id, draft).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<StatusCode, ApiError> {
    state.items.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
