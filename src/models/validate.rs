//! Form payload validation. Fails fast with field-level messages; everything
//! downstream (orchestrator, assembly) may assume a validated record.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::enums::UseCaseType;
use super::record::FormRecord;

/// File names carry a corporate code prefix (e.g. `AB123ConsultaClientes`)
/// and never an extension.
static FILE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}\d{3}[A-Za-z0-9]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn invalid_enum(field: &str, value: &str) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.to_string(),
                message: format!("unknown value '{value}'"),
            }],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "form validation failed: {joined}")
    }
}

/// Heuristic infinitive-verb test for Spanish use-case names: the first word
/// must end in -ar, -er or -ir ("Consultar clientes", "Generar reporte").
pub fn starts_with_infinitive(name: &str) -> bool {
    let first = match name.split_whitespace().next() {
        Some(w) => w.to_lowercase(),
        None => return false,
    };
    first.len() >= 3 && (first.ends_with("ar") || first.ends_with("er") || first.ends_with("ir"))
}

/// Validate a form record against its schema contract. Collects every issue
/// before failing so the caller can surface all of them at once.
pub fn validate_record(record: &FormRecord) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    require(&mut issues, "client", &record.client);
    require(&mut issues, "project", &record.project);
    require(&mut issues, "useCaseCode", &record.use_case_code);
    require(&mut issues, "useCaseName", &record.use_case_name);
    require(&mut issues, "fileName", &record.file_name);

    if !record.use_case_name.trim().is_empty() && !starts_with_infinitive(&record.use_case_name) {
        issues.push(FieldIssue {
            field: "useCaseName".into(),
            message: "must begin with an infinitive verb (e.g. 'Consultar clientes')".into(),
        });
    }

    if !record.file_name.is_empty() {
        if record.file_name.contains('.') {
            issues.push(FieldIssue {
                field: "fileName".into(),
                message: "must not carry a file extension".into(),
            });
        } else if !FILE_NAME_PATTERN.is_match(&record.file_name) {
            issues.push(FieldIssue {
                field: "fileName".into(),
                message: "must match the code-prefix pattern (e.g. 'AB123Demo')".into(),
            });
        }
    }

    match record.use_case_type {
        UseCaseType::Entity => {
            if record.entity_fields.is_empty() {
                issues.push(FieldIssue {
                    field: "entityFields".into(),
                    message: "entity use cases need at least one field spec".into(),
                });
            }
        }
        UseCaseType::Api => {
            require(&mut issues, "endpoint", &record.endpoint);
            require(&mut issues, "httpMethod", &record.http_method);
        }
        UseCaseType::Service => {
            require(&mut issues, "frequency", &record.frequency);
        }
    }

    for (i, step) in record.test_steps.iter().enumerate() {
        if step.number != (i + 1) as u32 {
            issues.push(FieldIssue {
                field: format!("testSteps[{i}].number"),
                message: format!("expected {} (steps must be contiguous 1..N)", i + 1),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

fn require(issues: &mut Vec<FieldIssue>, field: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(FieldIssue {
            field: field.to_string(),
            message: "is required".to_string(),
        });
    }
}
