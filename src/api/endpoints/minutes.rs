//! Minute analysis endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{AppState, MinuteRequest, MinuteResponse};
use crate::extraction::analyze_minute;

/// `POST /api/minutes/analyze` — free meeting-notes text in, partial form
/// record out. Always usable: extraction failures fall back to a canned
/// record inside the mapper.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<MinuteRequest>,
) -> Result<Json<MinuteResponse>, ApiError> {
    let orchestrator = state.orchestrator.clone();
    let form_data = tokio::task::spawn_blocking(move || {
        analyze_minute(
            &orchestrator,
            &request.free_text,
            request.use_case_type,
            &request.provider_id,
        )
    })
    .await
    .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))?;

    Ok(Json(MinuteResponse {
        success: true,
        form_data,
    }))
}
