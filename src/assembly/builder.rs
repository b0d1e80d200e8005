//! Tree construction. The fixed section sequence per use-case type lives
//! here; every free-text value passes through the accent corrector, while
//! literals the engine authors do not.

use chrono::Utc;

use crate::correction::correct_accents;
use crate::models::{EntityFieldSpec, FormRecord, UseCaseType};

use super::assets::load_wireframe;
use super::{DocNode, DocumentTree};

/// Default HTTP error codes for the `api` variant when none are configured.
const DEFAULT_ERROR_CODES: &[&str] = &["400", "401", "404", "500"];

const DEFAULT_PRECONDITIONS: &str =
    "El usuario cuenta con una sesión activa y los permisos necesarios.";
const DEFAULT_POSTCONDITIONS: &str =
    "La operación queda registrada y disponible para su consulta.";

/// Build the full document tree for a record. `generated_body` is the
/// sanitized (and, for `api`, enforced) provider prose; when absent the
/// record description stands in.
pub fn build_document_tree(record: &FormRecord, generated_body: Option<&str>) -> DocumentTree {
    let mut nodes = Vec::new();

    project_info(&mut nodes, record);
    description(&mut nodes, record, generated_body);

    nodes.push(heading(1, "Flujo principal de eventos"));
    match record.use_case_type {
        UseCaseType::Entity => entity_main_flow(&mut nodes, record),
        UseCaseType::Api => api_main_flow(&mut nodes, record),
        UseCaseType::Service => service_main_flow(&mut nodes, record),
    }

    nodes.push(heading(1, "Flujos alternativos"));
    match record.use_case_type {
        UseCaseType::Entity => entity_alternative_flows(&mut nodes, record),
        UseCaseType::Api => api_alternative_flows(&mut nodes, record),
        UseCaseType::Service => service_alternative_flows(&mut nodes),
    }

    business_rules(&mut nodes, record);
    special_requirements(&mut nodes, record);
    preconditions(&mut nodes, record);
    postconditions(&mut nodes, record);
    wireframes(&mut nodes, record);
    test_cases(&mut nodes, record);
    revision_history(&mut nodes, record);

    DocumentTree {
        title: format!(
            "{} - {}",
            record.use_case_code,
            correct_accents(&record.use_case_name)
        ),
        nodes,
    }
}

fn heading(level: u8, text: &str) -> DocNode {
    DocNode::Heading {
        level,
        text: text.to_string(),
    }
}

fn item(level: u8, text: String) -> DocNode {
    DocNode::Numbered { level, text }
}

fn project_info(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    nodes.push(heading(1, "Información del proyecto"));
    nodes.push(DocNode::Paragraph(format!(
        "Cliente: {}",
        correct_accents(&record.client)
    )));
    nodes.push(DocNode::Paragraph(format!(
        "Proyecto: {}",
        correct_accents(&record.project)
    )));
    nodes.push(DocNode::Paragraph(format!(
        "Código: {}",
        record.use_case_code
    )));
    nodes.push(DocNode::Paragraph(format!("Archivo: {}", record.file_name)));
}

fn description(nodes: &mut Vec<DocNode>, record: &FormRecord, generated_body: Option<&str>) {
    nodes.push(heading(1, "Descripción"));
    let body = generated_body
        .filter(|b| !b.trim().is_empty())
        .unwrap_or(&record.description);
    for paragraph in body.split("\n\n").filter(|p| !p.trim().is_empty()) {
        nodes.push(DocNode::Paragraph(correct_accents(paragraph.trim())));
    }
}

fn preconditions(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    nodes.push(heading(1, "Precondiciones"));
    push_lines_or_default(nodes, &record.preconditions, DEFAULT_PRECONDITIONS);
}

fn postconditions(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    nodes.push(heading(1, "Postcondiciones"));
    push_lines_or_default(nodes, &record.postconditions, DEFAULT_POSTCONDITIONS);
}

/// One numbered item per non-empty user line; the canonical default when the
/// field is blank.
fn push_lines_or_default(nodes: &mut Vec<DocNode>, value: &str, default: &str) {
    let lines: Vec<&str> = value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        nodes.push(item(1, default.to_string()));
        return;
    }
    for line in lines {
        nodes.push(item(1, correct_accents(line)));
    }
}

fn describe_entity_field(field: &EntityFieldSpec) -> String {
    let mut text = format!(
        "{} ({}{})",
        correct_accents(&field.name),
        field.field_type.as_str(),
        if field.mandatory { ", obligatorio" } else { "" },
    );
    if let Some(length) = field.length {
        text.push_str(&format!(", longitud máxima {length}"));
    }
    text
}

fn entity_main_flow(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    nodes.push(item(
        1,
        "El usuario accede a la pantalla de consulta de la entidad.".into(),
    ));
    nodes.push(item(2, "El usuario ingresa los filtros de búsqueda:".into()));
    for filter in &record.search_filters {
        nodes.push(item(3, correct_accents(filter)));
    }
    nodes.push(item(
        2,
        "El sistema muestra los resultados con las columnas:".into(),
    ));
    for column in &record.result_columns {
        nodes.push(item(3, correct_accents(column)));
    }

    nodes.push(item(
        1,
        "El usuario selecciona la opción de crear un nuevo registro.".into(),
    ));
    nodes.push(item(2, "El sistema solicita los datos de la entidad:".into()));
    for field in &record.entity_fields {
        nodes.push(item(3, describe_entity_field(field)));
    }
    nodes.push(item(
        2,
        "El sistema valida los datos ingresados y guarda el registro.".into(),
    ));
    nodes.push(item(
        1,
        "El sistema confirma la operación y actualiza la lista de resultados.".into(),
    ));
}

fn entity_alternative_flows(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    nodes.push(item(1, "Actualización de un registro existente".into()));
    nodes.push(item(
        2,
        "El usuario selecciona un registro de la lista y elige editarlo.".into(),
    ));
    nodes.push(item(
        2,
        "El sistema presenta los datos actuales de la entidad:".into(),
    ));
    for field in &record.entity_fields {
        nodes.push(item(3, describe_entity_field(field)));
    }
    nodes.push(item(
        2,
        "El sistema valida los cambios y actualiza el registro.".into(),
    ));

    nodes.push(item(1, "Eliminación de un registro".into()));
    nodes.push(item(
        2,
        "El sistema solicita la confirmación del usuario antes de eliminar.".into(),
    ));
    nodes.push(item(
        2,
        "Si el registro está referenciado por otras entidades, el sistema \
         rechaza la eliminación para preservar la integridad referencial."
            .into(),
    ));
}

fn api_main_flow(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    nodes.push(item(
        1,
        format!(
            "El cliente envía una solicitud {} al endpoint {}.",
            record.http_method, record.endpoint
        ),
    ));
    let request_format = non_empty_or(&record.request_format, "JSON");
    nodes.push(item(
        2,
        format!("La solicitud incluye el cuerpo en formato {request_format}."),
    ));
    nodes.push(item(
        1,
        "El sistema valida la solicitud y ejecuta la operación correspondiente.".into(),
    ));
    let response_format = non_empty_or(&record.response_format, "JSON");
    nodes.push(item(
        1,
        format!("El sistema responde con el código 200 y el cuerpo en formato {response_format}."),
    ));
}

fn api_alternative_flows(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    let configured: Vec<String> = record
        .error_codes
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    let codes: Vec<String> = if configured.is_empty() {
        DEFAULT_ERROR_CODES.iter().map(|c| c.to_string()).collect()
    } else {
        configured
    };

    for code in codes {
        nodes.push(item(1, format!("Error {code}")));
        nodes.push(item(2, "El sistema detecta la condición de error.".into()));
        nodes.push(item(
            2,
            "El sistema registra el evento en la bitácora.".into(),
        ));
        nodes.push(item(
            2,
            format!("El sistema devuelve el código {code} con el detalle del error."),
        ));
    }
}

fn service_main_flow(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    nodes.push(item(
        1,
        format!(
            "El servicio se ejecuta automáticamente con frecuencia {}.",
            correct_accents(&record.frequency)
        ),
    ));
    // Sub-steps appear only when their backing field carries a value.
    if !record.execution_time.trim().is_empty() {
        nodes.push(item(
            2,
            format!("La ejecución inicia a las {}.", record.execution_time.trim()),
        ));
    }
    if !record.configuration_path.trim().is_empty() {
        nodes.push(item(
            2,
            format!(
                "El servicio lee su configuración desde {}.",
                record.configuration_path.trim()
            ),
        ));
    }
    if !record.credential_source.trim().is_empty() {
        nodes.push(item(
            2,
            format!(
                "Las credenciales se obtienen desde {}.",
                record.credential_source.trim()
            ),
        ));
    }
    nodes.push(item(
        1,
        "El servicio procesa los registros pendientes y registra el resultado de la ejecución."
            .into(),
    ));
}

fn service_alternative_flows(nodes: &mut Vec<DocNode>) {
    for (title, detail) in [
        (
            "Fallo en la captura de datos",
            "El servicio registra el error y continúa con el siguiente registro.",
        ),
        (
            "Fallo en la llamada a servicios externos",
            "El servicio registra el error y reintenta en la siguiente ejecución programada.",
        ),
        (
            "Fallo en el procesamiento",
            "El servicio registra el error, marca el registro como pendiente y notifica al área responsable.",
        ),
    ] {
        nodes.push(item(1, title.into()));
        nodes.push(item(2, "El servicio detecta la condición de fallo.".into()));
        nodes.push(item(2, detail.into()));
    }
}

fn business_rules(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    if record.business_rules.trim().is_empty() {
        return;
    }
    nodes.push(heading(1, "Reglas de negocio"));
    for line in record
        .business_rules
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        nodes.push(item(1, correct_accents(line)));
    }
}

fn special_requirements(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    if record.special_requirements.trim().is_empty() {
        return;
    }
    nodes.push(heading(1, "Requerimientos especiales"));
    for line in record
        .special_requirements
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        nodes.push(item(1, correct_accents(line)));
    }
}

fn wireframes(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    if record.wireframes.is_empty() {
        return;
    }
    let mut loaded = Vec::new();
    for reference in &record.wireframes {
        match load_wireframe(reference) {
            Ok(png) => loaded.push(DocNode::Image {
                caption: correct_accents(&reference.title),
                png,
            }),
            Err(e) => {
                tracing::warn!(source = %reference.source, error = %e, "wireframe omitted");
            }
        }
    }
    if loaded.is_empty() {
        return;
    }
    nodes.push(heading(1, "Prototipos de pantalla"));
    nodes.extend(loaded);
}

fn test_cases(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    if record.test_steps.is_empty() {
        return;
    }
    nodes.push(heading(1, "Casos de prueba"));
    nodes.push(DocNode::Paragraph(format!(
        "Objetivo: verificar el comportamiento de \"{}\".",
        correct_accents(&record.use_case_name)
    )));
    let preconditions_text = if record.preconditions.trim().is_empty() {
        DEFAULT_PRECONDITIONS.to_string()
    } else {
        correct_accents(record.preconditions.trim())
    };
    nodes.push(DocNode::Paragraph(format!(
        "Precondiciones: {preconditions_text}"
    )));
    nodes.push(DocNode::Table {
        headers: vec![
            "#".into(),
            "Acción".into(),
            "Datos de entrada".into(),
            "Resultado esperado".into(),
        ],
        rows: record
            .test_steps
            .iter()
            .map(|s| {
                vec![
                    s.number.to_string(),
                    correct_accents(&s.action),
                    correct_accents(&s.input_data),
                    correct_accents(&s.expected_result),
                ]
            })
            .collect(),
    });
}

/// Mandatory for every type: exactly one revision table, 2 rows x 4 columns.
fn revision_history(nodes: &mut Vec<DocNode>, record: &FormRecord) {
    let today = Utc::now().format("%d/%m/%Y").to_string();
    nodes.push(heading(1, "Historial de revisiones"));
    nodes.push(DocNode::Table {
        headers: vec![
            "Fecha".into(),
            "Acción".into(),
            "Responsable".into(),
            "Comentario".into(),
        ],
        rows: vec![
            vec![
                today.clone(),
                "Creación del documento".into(),
                correct_accents(&record.client),
                String::new(),
            ],
            vec![
                today,
                "Generación del contenido".into(),
                "Sistema".into(),
                String::new(),
            ],
        ],
    });
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}
