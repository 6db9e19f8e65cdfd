//! Medical history handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::{Caller, MedicalRecordId};
use domain_party::{MedicalRecord, MedicalRecordDraft};

use crate::error::{ApiError, ApiJson};
use crate::AppState;

pub async fn list_records(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<MedicalRecord>>, ApiError> {
    Ok(Json(state.medical_history.list(&caller).await?))
}

pub async fn get_record(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<MedicalRecordId>,
) -> Result<Json<MedicalRecord>, ApiError> {
    Ok(Json(state.medical_history.get(&caller, id).await?))
}

pub async fn create_record(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(draft): ApiJson<MedicalRecordDraft>,
) -> Result<(StatusCode, Json<MedicalRecord>), ApiError> {
    let record = state.medical_history.create(&caller, draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_record(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<MedicalRecordId>,
    ApiJson(draft): ApiJson<MedicalRecordDraft>,
) -> Result<Json<MedicalRecord>, ApiError> {
    Ok(Json(state.medical_history.update(&caller, id, draft).await?))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<MedicalRecordId>,
) -> Result<StatusCode, ApiError> {
    state.medical_history.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
