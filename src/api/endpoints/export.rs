//! Document export endpoint: assembled tree to PDF bytes.

use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ExportRequest;
use crate::assembly::{
    build_document_tree, export_file_name, load_wireframe, render_pdf, DocNode, ExportError,
};
use crate::models::WireframeRef;

/// `POST /api/usecases/export` — `formData` is mandatory; the legacy
/// content-only path is disabled.
pub async fn export(Json(request): Json<ExportRequest>) -> Result<impl IntoResponse, ApiError> {
    let record = request
        .form_data
        .ok_or_else(|| ApiError::BadRequest("formData is required for export".to_string()))?;
    let content = request.content;
    let header_image = request.custom_header_image;

    let (bytes, file_name) = tokio::task::spawn_blocking(move || {
        let mut tree = build_document_tree(&record, content.as_deref());
        if let Some(source) = header_image {
            let reference = WireframeRef {
                title: String::new(),
                source,
            };
            match load_wireframe(&reference) {
                Ok(png) => tree.nodes.insert(
                    0,
                    DocNode::Image {
                        caption: String::new(),
                        png,
                    },
                ),
                Err(e) => tracing::warn!(error = %e, "custom header image omitted"),
            }
        }
        let bytes = render_pdf(&tree)?;
        Ok::<(Vec<u8>, String), ExportError>((bytes, export_file_name(&record.file_name)))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("export task failed: {e}")))??;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    Ok((headers, bytes))
}
