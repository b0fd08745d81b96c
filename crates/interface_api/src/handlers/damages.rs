//! Damage handlers
//!
//! Every damage operation answers with the whole updated claim.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::dto::claims::*;
use crate::extractors::ValidatedJson;
use crate::{error::ApiError, AppState};

pub async fn add_damage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateDamageRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.damages.add_damage(&id, request.into()).await?;
    Ok(Json(claim.into()))
}

pub async fn update_damage(
    State(state): State<AppState>,
    Path((id, damage_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateDamageRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .damages
        .update_damage(&id, &damage_id, request.into())
        .await?;
    Ok(Json(claim.into()))
}

pub async fn delete_damage(
    State(state): State<AppState>,
    Path((id, damage_id)): Path<(String, String)>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.damages.delete_damage(&id, &damage_id).await?;
    Ok(Json(claim.into()))
}
