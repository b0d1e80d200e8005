//! Single-field improvement endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{AppState, ImproveRequest, ImproveResponse};

/// `POST /api/fields/improve` — never fails on provider trouble: the
/// orchestrator degrades to the offline canned improvement.
pub async fn improve(
    State(state): State<AppState>,
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImproveResponse>, ApiError> {
    let orchestrator = state.orchestrator.clone();
    let improved_value = tokio::task::spawn_blocking(move || {
        orchestrator.improve_field(
            &request.field_name,
            request.field_type,
            &request.field_value,
            &request.context,
            &request.provider_id,
        )
    })
    .await
    .map_err(|e| ApiError::Internal(format!("improvement task failed: {e}")))?;

    Ok(Json(ImproveResponse { improved_value }))
}
