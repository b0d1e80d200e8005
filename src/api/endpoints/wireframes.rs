//! Wireframe rasterization endpoint.

use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::wireframe::{render_wireframe, WireframeSpec};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireframeResponse {
    pub data_uri: String,
}

/// `POST /api/wireframes` — rasterization is CPU-bound, so it runs off the
/// async scheduler.
pub async fn create(Json(spec): Json<WireframeSpec>) -> Result<Json<WireframeResponse>, ApiError> {
    let data_uri = tokio::task::spawn_blocking(move || render_wireframe(&spec))
        .await
        .map_err(|e| ApiError::Internal(format!("wireframe task failed: {e}")))??;

    Ok(Json(WireframeResponse { data_uri }))
}
