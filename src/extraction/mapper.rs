//! Minute analysis: drives the orchestrator with an extraction prompt over
//! free meeting-notes text and maps the response into a partial form record.
//! The caller always receives a usable record — parse failures fall back to
//! a canned example, field mix-ups are repaired heuristically.

use crate::generation::Orchestrator;
use crate::models::{starts_with_infinitive, GenerationTask, TaskKind, UseCaseType};
use crate::providers::offline;

use super::parser::parse_minute_payload;
use super::MinuteFormData;

/// Keyword → inferred project name, checked in order against the use-case
/// name when the minute never states a project.
const PROJECT_KEYWORDS: &[(&str, &str)] = &[
    ("factur", "Sistema de Facturación"),
    ("pago", "Sistema de Pagos"),
    ("cliente", "Portal de Clientes"),
    ("usuario", "Portal de Usuarios"),
    ("reporte", "Plataforma de Reportes"),
    ("inventario", "Sistema de Inventario"),
];

/// Extraction prompt: the provider must return exactly the expected object
/// shape, nothing else.
pub fn build_extraction_prompt(free_text: &str, use_case_type: UseCaseType) -> String {
    format!(
        "Analiza la siguiente minuta de reunión y extrae los datos para un caso de \
         uso de tipo '{kind}'. Devuelve EXACTAMENTE un objeto JSON con esta forma, \
         sin comentarios ni texto adicional:\n\n\
         {{\n\
         \x20 \"useCaseName\": \"nombre iniciando con verbo en infinitivo\",\n\
         \x20 \"client\": \"nombre del cliente\",\n\
         \x20 \"project\": \"nombre del proyecto\",\n\
         \x20 \"description\": \"descripción de la funcionalidad\",\n\
         \x20 \"searchFilters\": [\"filtro\"],\n\
         \x20 \"resultColumns\": [\"columna\"],\n\
         \x20 \"businessRules\": \"una regla por línea\"\n\
         }}\n\n\
         Minuta:\n{free_text}",
        kind = use_case_type.as_str(),
    )
}

/// Analyze a minute. Never errors: generation or parse failure substitutes
/// the canned example record.
pub fn analyze_minute(
    orchestrator: &Orchestrator,
    free_text: &str,
    use_case_type: UseCaseType,
    provider_id: &str,
) -> MinuteFormData {
    let task = GenerationTask {
        provider_id: provider_id.to_string(),
        kind: TaskKind::Extraction,
        payload: build_extraction_prompt(free_text, use_case_type),
    };

    let mut data = match orchestrator.run(&task) {
        Ok(raw) => match parse_minute_payload(&raw) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "minute payload unparseable, using canned record");
                canned_record()
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "minute extraction failed, using canned record");
            canned_record()
        }
    };

    repair_fields(&mut data);
    data
}

/// The canned example record, kept in sync with the offline provider's
/// extraction payload.
pub fn canned_record() -> MinuteFormData {
    parse_minute_payload(&offline::extraction()).unwrap_or_else(|_| MinuteFormData {
        use_case_name: "Gestionar registros del negocio".into(),
        client: "Cliente General".into(),
        project: "Proyecto General".into(),
        ..MinuteFormData::default()
    })
}

/// Post-parse repair heuristics over a parsed record.
pub fn repair_fields(data: &mut MinuteFormData) {
    // Providers regularly swap the two name fields; the infinitive-verb test
    // says which one is the use-case name.
    let name_ok = starts_with_infinitive(&data.use_case_name);
    let client_looks_like_name = starts_with_infinitive(&data.client);
    if !name_ok && client_looks_like_name {
        std::mem::swap(&mut data.use_case_name, &mut data.client);
    }

    if data.project.trim().is_empty() {
        data.project = infer_project(&data.use_case_name);
    }
}

fn infer_project(use_case_name: &str) -> String {
    let lower = use_case_name.to_lowercase();
    for (keyword, project) in PROJECT_KEYWORDS {
        if lower.contains(keyword) {
            return (*project).to_string();
        }
    }
    "Proyecto General".to_string()
}
