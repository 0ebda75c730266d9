//! HTTP handlers for prompt version history and rollback.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{GetPromptHistoryQuery, RollbackPromptCommand};
use crate::domain::foundation::{PromptVersionId, ValidationError};
use crate::domain::prompt::PromptSlot;

use super::dto::{
    HistoryParams, PromptHistoryResponse, PromptVersionResponse, RollbackRequest,
    RollbackResponse,
};

/// GET /prompts/:slot - Saved versions, newest first
pub async fn get_prompt_history(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<PromptHistoryResponse>, ApiError> {
    let Query(params) = params?;
    let slot = parse_slot(&state, &slot)?;

    let versions = state
        .prompt_history_handler()
        .handle(GetPromptHistoryQuery {
            slot,
            limit: params.limit,
        })
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(PromptHistoryResponse {
        slot,
        versions: versions.iter().map(PromptVersionResponse::from).collect(),
    }))
}

/// POST /prompts/:slot/rollback - Restore an earlier version as the newest
pub async fn rollback_prompt(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    payload: Result<Json<RollbackRequest>, JsonRejection>,
) -> Result<Json<RollbackResponse>, ApiError> {
    let Json(request) = payload?;
    let slot = parse_slot(&state, &slot)?;
    let version_id: PromptVersionId = request.version_id.parse().map_err(|_| {
        state.api_error(ValidationError::invalid_format("versionId", "expected a UUID").into())
    })?;

    let restored = state
        .rollback_prompt_handler()
        .handle(RollbackPromptCommand { slot, version_id })
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(RollbackResponse {
        version: PromptVersionResponse::from(&restored),
    }))
}

fn parse_slot(state: &AppState, raw: &str) -> Result<PromptSlot, ApiError> {
    raw.parse().map_err(|e: ValidationError| state.api_error(e.into()))
}
