//! Shared API state and request/response DTOs. Wire format is camelCase.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::extraction::MinuteFormData;
use crate::generation::Orchestrator;
use crate::models::{FieldType, FormRecord, UseCaseType};
use crate::store::RecordStore;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            store,
            orchestrator,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub record: FormRecord,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub record: FormRecord,
    #[serde(default = "default_provider")]
    pub provider_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub instruction: String,
    #[serde(default = "default_provider")]
    pub provider_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCasesRequest {
    #[serde(default = "default_provider")]
    pub provider_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    pub field_name: String,
    #[serde(default)]
    pub field_value: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub context: String,
    #[serde(default = "default_provider")]
    pub provider_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveResponse {
    pub improved_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinuteRequest {
    pub free_text: String,
    pub use_case_type: UseCaseType,
    #[serde(default = "default_provider")]
    pub provider_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinuteResponse {
    pub success: bool,
    pub form_data: MinuteFormData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub content: Option<String>,
    /// Required. The legacy content-only export path is disabled.
    #[serde(default)]
    pub form_data: Option<FormRecord>,
    /// Optional `data:image/...` URI placed at the top of the document.
    #[serde(default)]
    pub custom_header_image: Option<String>,
}

fn default_provider() -> String {
    "openai".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_flattens_the_record() {
        let json = r#"{
            "client": "Acme",
            "project": "Portal",
            "useCaseCode": "CU001",
            "useCaseName": "Consultar clientes",
            "fileName": "AB123Demo",
            "useCaseType": "entity",
            "providerId": "gemini"
        }"#;
        let request: GenerateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.record.client, "Acme");
        assert_eq!(request.provider_id, "gemini");
    }

    #[test]
    fn provider_id_defaults_when_absent() {
        let request: MinuteRequest = serde_json::from_str(
            r#"{"freeText": "minuta", "useCaseType": "api"}"#,
        )
        .unwrap();
        assert_eq!(request.provider_id, "openai");
    }

    #[test]
    fn export_request_tolerates_missing_form_data() {
        let request: ExportRequest =
            serde_json::from_str(r#"{"content": "texto"}"#).unwrap();
        assert!(request.form_data.is_none());
    }
}
