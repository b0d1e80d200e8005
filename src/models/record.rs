use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{FieldType, TaskKind, TestStatus, UseCaseType};

/// One business use-case request. The structural source of truth for the
/// assembly engine: generated prose never overrides these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub client: String,
    pub project: String,
    pub use_case_code: String,
    pub use_case_name: String,
    pub file_name: String,
    pub use_case_type: UseCaseType,
    #[serde(default)]
    pub description: String,

    // Entity variant
    #[serde(default)]
    pub search_filters: Vec<String>,
    #[serde(default)]
    pub result_columns: Vec<String>,
    #[serde(default)]
    pub entity_fields: Vec<EntityFieldSpec>,

    // Api variant
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub request_format: String,
    #[serde(default)]
    pub response_format: String,
    #[serde(default)]
    pub error_codes: Vec<String>,

    // Service variant
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub execution_time: String,
    #[serde(default)]
    pub configuration_path: String,
    #[serde(default)]
    pub credential_source: String,

    #[serde(default)]
    pub business_rules: String,
    #[serde(default)]
    pub special_requirements: String,
    #[serde(default)]
    pub preconditions: String,
    #[serde(default)]
    pub postconditions: String,
    #[serde(default)]
    pub wireframes: Vec<WireframeRef>,
    #[serde(default)]
    pub test_steps: Vec<TestStep>,
    /// Cache of the last sanitized generation result for this record.
    #[serde(default)]
    pub generated_content: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// One field of the entity being managed by an `entity` use case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityFieldSpec {
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub validation_rule: String,
}

/// One manual test step. Numbers stay contiguous 1..N through removals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    pub number: u32,
    pub action: String,
    #[serde(default)]
    pub input_data: String,
    pub expected_result: String,
    #[serde(default)]
    pub observations: String,
    #[serde(default = "TestStep::default_status")]
    pub status: TestStatus,
}

impl TestStep {
    fn default_status() -> TestStatus {
        TestStatus::Pending
    }
}

/// Reference to a wireframe image attached to the record. `source` is either
/// a `data:image/...;base64,` URI or a path relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireframeRef {
    #[serde(default)]
    pub title: String,
    pub source: String,
}

impl WireframeRef {
    pub fn is_data_uri(&self) -> bool {
        self.source.starts_with("data:image/")
    }
}

/// One unit of work for the generation orchestrator. Ephemeral: results are
/// consumed immediately by the assembly engine.
#[derive(Debug, Clone)]
pub struct GenerationTask {
    /// User-selected provider id; the fallback chain starts here.
    pub provider_id: String,
    pub kind: TaskKind,
    /// Prompt text. Unused when `provider_id` is the offline provider.
    pub payload: String,
}

/// Per-provider failure recorded while walking the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAttempt {
    pub provider: String,
    pub reason: String,
}

/// Remove the test step at `index`, renumbering survivors to 1..N-1 while
/// preserving relative order. Out-of-range indices are ignored.
pub fn remove_test_step(steps: &mut Vec<TestStep>, index: usize) {
    if index >= steps.len() {
        return;
    }
    steps.remove(index);
    for (i, step) in steps.iter_mut().enumerate() {
        step.number = (i + 1) as u32;
    }
}

impl FormRecord {
    /// Touch the update timestamp after an in-place mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
