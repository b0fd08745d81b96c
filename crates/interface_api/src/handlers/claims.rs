//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::dto::claims::*;
use crate::extractors::ValidatedJson;
use crate::{error::ApiError, AppState};

/// Opens a new claim
pub async fn create_claim(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state.claims.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Lists claims, oldest first
pub async fn list_claims(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.list().await?;
    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.get_by_id(&id).await?;
    Ok(Json(claim.into()))
}

/// Applies a partial update to a claim
pub async fn update_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.update(&id, request.into()).await?;
    Ok(Json(claim.into()))
}
