//! Use-case record endpoints: generation, editing, listing.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{AppState, EditRequest, GenerateRequest, GenerateResponse, TestCasesRequest};
use crate::assembly::{build_document_tree, render_text};
use crate::correction::correct_record;
use crate::generation::{generate_test_steps, GenerationError};
use crate::models::{validate_record, FormRecord};

/// `POST /api/usecases/generate` — validate, correct, generate, assemble.
/// The record is persisted only after generation succeeds.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let mut record = request.record;
    validate_record(&record)?;
    correct_record(&mut record);

    let orchestrator = state.orchestrator.clone();
    let provider_id = request.provider_id;
    let (record, content) = tokio::task::spawn_blocking(move || {
        let body = orchestrator.generate_document(&mut record, &provider_id)?;
        record.generated_content = Some(body.clone());
        let tree = build_document_tree(&record, Some(&body));
        Ok::<(FormRecord, String), GenerationError>((record, render_text(&tree)))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("generation task failed: {e}")))??;

    state.store.insert(record.clone())?;
    tracing::info!(record_id = %record.id, "use case generated and stored");

    Ok(Json(GenerateResponse {
        success: true,
        record,
        content,
    }))
}

/// `POST /api/usecases/:id/edit` — re-invoke the orchestrator over the
/// existing content with an explicit instruction.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EditRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let record = state.store.get(id)?;
    let existing = record.generated_content.clone().ok_or_else(|| {
        ApiError::BadRequest("record has no generated content to edit".to_string())
    })?;

    let orchestrator = state.orchestrator.clone();
    let (body, content) = tokio::task::spawn_blocking(move || {
        let body = orchestrator.edit_document(
            &record,
            &existing,
            &request.instruction,
            &request.provider_id,
        )?;
        let tree = build_document_tree(&record, Some(&body));
        Ok::<(String, String), GenerationError>((body, render_text(&tree)))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("edit task failed: {e}")))??;

    let updated = state
        .store
        .update(id, |r| r.generated_content = Some(body.clone()))?;

    Ok(Json(GenerateResponse {
        success: true,
        record: updated,
        content,
    }))
}

/// `POST /api/usecases/:id/testcases` — generate test steps for a stored
/// record and persist them on it.
pub async fn testcases(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TestCasesRequest>,
) -> Result<Json<FormRecord>, ApiError> {
    let record = state.store.get(id)?;

    let orchestrator = state.orchestrator.clone();
    let steps = tokio::task::spawn_blocking(move || {
        generate_test_steps(&orchestrator, &record, &request.provider_id)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("test generation task failed: {e}")))??;

    let updated = state.store.update(id, |r| r.test_steps = steps.clone())?;
    tracing::info!(record_id = %id, steps = updated.test_steps.len(), "test steps generated");
    Ok(Json(updated))
}

/// `GET /api/usecases` — all records, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FormRecord>>, ApiError> {
    Ok(Json(state.store.list()?))
}

/// `GET /api/usecases/:id`
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormRecord>, ApiError> {
    Ok(Json(state.store.get(id)?))
}
