pub mod mapper;
pub mod parser;

pub use mapper::*;
pub use parser::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Partial form record extracted from free meeting-notes text. Everything is
/// optional; the form wizard merges it over its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MinuteFormData {
    pub use_case_name: String,
    pub client: String,
    pub project: String,
    pub description: String,
    pub search_filters: Vec<String>,
    pub result_columns: Vec<String>,
    pub business_rules: String,
}

/// Internal only: callers of the mapper always receive a usable record.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no JSON object found in provider output")]
    NoPayload,

    #[error("JSON parsing error: {0}")]
    Json(String),
}
