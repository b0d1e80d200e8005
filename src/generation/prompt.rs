//! Prompt construction. Pure functions of the form snapshot plus the
//! structural rulebook for the selected use-case type; every non-empty form
//! field appears verbatim in the serialized block so a provider cannot
//! substitute invented values for user-supplied ones.

use crate::models::{EntityFieldSpec, FieldType, FormRecord, UseCaseType};

/// Descriptions shorter than this many words trigger the one-shot expansion
/// sub-task before any document prompt is built.
pub const SHORT_DESCRIPTION_WORDS: usize = 50;

const RULEBOOK_ENTITY: &str = "\
El documento describe un caso de uso de gestión de entidad (alta, consulta, \
modificación y baja). El flujo principal cubre la búsqueda con sus filtros y \
columnas de resultado, y el registro de una nueva entidad campo por campo. \
Los flujos alternativos cubren la modificación y la eliminación con su \
advertencia de integridad relacional.";

const RULEBOOK_API: &str = "\
El documento describe un caso de uso de servicio API. El flujo principal \
narra la recepción de la petición, su validación, el procesamiento y la \
respuesta. Los flujos alternativos enumeran un bloque por código de error \
configurado, con pasos de detección, registro y retorno del código.";

const RULEBOOK_SERVICE: &str = "\
El documento describe un caso de uso de proceso de servicio programado. El \
flujo principal cubre la activación según su frecuencia, la carga de \
configuración, el uso de credenciales y la ejecución. Los flujos \
alternativos cubren fallas de captura, de llamadas externas y de \
procesamiento.";

/// Declarative field-type → writing-rule table for single-field improvement.
const FIELD_RULES: &[(FieldType, &str)] = &[
    (FieldType::Text, "Redacta el valor como texto claro, profesional y conciso."),
    (FieldType::Number, "Expresa el valor como cantidad entera, sin unidades ambiguas."),
    (FieldType::Decimal, "Expresa el valor numérico con su precisión decimal esperada."),
    (FieldType::Date, "Expresa la fecha en formato AAAA-MM-DD."),
    (FieldType::Datetime, "Expresa la fecha y hora en formato AAAA-MM-DD HH:MM."),
    (FieldType::Boolean, "Expresa el valor como condición afirmativa o negativa clara."),
    (FieldType::Email, "Expresa el valor como dirección de correo electrónico válida."),
];

pub fn rulebook_for(use_case_type: UseCaseType) -> &'static str {
    match use_case_type {
        UseCaseType::Entity => RULEBOOK_ENTITY,
        UseCaseType::Api => RULEBOOK_API,
        UseCaseType::Service => RULEBOOK_SERVICE,
    }
}

pub fn field_rule_for(field_type: FieldType) -> &'static str {
    FIELD_RULES
        .iter()
        .find(|(t, _)| *t == field_type)
        .map(|(_, rule)| *rule)
        .unwrap_or("Redacta el valor como texto claro y conciso.")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Serialize the form snapshot. Every non-empty field appears verbatim.
pub fn serialize_form_block(record: &FormRecord) -> String {
    let mut lines = Vec::new();
    push_field(&mut lines, "Cliente", &record.client);
    push_field(&mut lines, "Proyecto", &record.project);
    push_field(&mut lines, "Código del caso de uso", &record.use_case_code);
    push_field(&mut lines, "Nombre del caso de uso", &record.use_case_name);
    push_field(&mut lines, "Nombre de archivo", &record.file_name);
    push_field(&mut lines, "Tipo", record.use_case_type.as_str());
    push_field(&mut lines, "Descripción", &record.description);

    push_list(&mut lines, "Filtros de búsqueda", &record.search_filters);
    push_list(&mut lines, "Columnas de resultado", &record.result_columns);
    if !record.entity_fields.is_empty() {
        lines.push("Campos de la entidad:".to_string());
        for field in &record.entity_fields {
            lines.push(format!("- {}", describe_field(field)));
        }
    }

    push_field(&mut lines, "Endpoint", &record.endpoint);
    push_field(&mut lines, "Método HTTP", &record.http_method);
    push_field(&mut lines, "Formato de petición", &record.request_format);
    push_field(&mut lines, "Formato de respuesta", &record.response_format);
    push_list(&mut lines, "Códigos de error", &record.error_codes);

    push_field(&mut lines, "Frecuencia", &record.frequency);
    push_field(&mut lines, "Horario de ejecución", &record.execution_time);
    push_field(&mut lines, "Ruta de configuración", &record.configuration_path);
    push_field(&mut lines, "Origen de credenciales", &record.credential_source);

    push_field(&mut lines, "Reglas de negocio", &record.business_rules);
    push_field(&mut lines, "Requerimientos especiales", &record.special_requirements);
    push_field(&mut lines, "Precondiciones", &record.preconditions);
    push_field(&mut lines, "Postcondiciones", &record.postconditions);

    lines.join("\n")
}

fn describe_field(field: &EntityFieldSpec) -> String {
    let mut parts = vec![format!("{} ({}", field.name, field.field_type.as_str())];
    if let Some(len) = field.length {
        parts.push(format!(", longitud {len}"));
    }
    if field.mandatory {
        parts.push(", obligatorio".to_string());
    }
    parts.push(")".to_string());
    let mut line = parts.concat();
    if !field.description.trim().is_empty() {
        line.push_str(&format!(": {}", field.description));
    }
    if !field.validation_rule.trim().is_empty() {
        line.push_str(&format!(" [regla: {}]", field.validation_rule));
    }
    line
}

fn push_field(lines: &mut Vec<String>, label: &str, value: &str) {
    if !value.trim().is_empty() {
        lines.push(format!("{label}: {value}"));
    }
}

fn push_list(lines: &mut Vec<String>, label: &str, values: &[String]) {
    if !values.is_empty() {
        lines.push(format!("{label}: {}", values.join(", ")));
    }
}

/// Full document prompt for one record.
pub fn build_document_prompt(record: &FormRecord) -> String {
    format!(
        "Eres un analista funcional. Redacta la narrativa de un documento de caso \
         de uso corporativo en español, usando exclusivamente los datos del \
         formulario. No inventes valores para los campos provistos.\n\n\
         {rulebook}\n\n\
         Datos del formulario:\n{form}\n\n\
         El documento DEBE incluir las secciones 'Flujo principal de eventos' y \
         'Flujos alternativos'. Envuelve todo el documento entre las etiquetas \
         <documento> y </documento>, sin texto fuera de ellas.",
        rulebook = rulebook_for(record.use_case_type),
        form = serialize_form_block(record),
    )
}

/// One-shot description expansion: exactly two substantial paragraphs.
pub fn build_expansion_prompt(description: &str, use_case_name: &str) -> String {
    format!(
        "Amplía la siguiente descripción de un caso de uso llamado \
         '{use_case_name}'. Redacta exactamente dos párrafos sustanciales en \
         español, separados por una línea en blanco, sin títulos ni listas.\n\n\
         Descripción original: {description}"
    )
}

/// Single-field improvement prompt, driven by the field-rule table.
pub fn build_field_improvement_prompt(
    field_name: &str,
    field_type: FieldType,
    value: &str,
    context: &str,
) -> String {
    let mut prompt = format!(
        "Mejora la redacción del campo '{field_name}' de un formulario de caso de \
         uso. {rule} Devuelve únicamente el valor mejorado, sin comentarios.\n\n\
         Valor actual: {value}",
        rule = field_rule_for(field_type),
    );
    if !context.trim().is_empty() {
        prompt.push_str(&format!("\nContexto: {context}"));
    }
    prompt
}

/// Edit instruction over existing generated content.
pub fn build_edit_prompt(existing: &str, instruction: &str) -> String {
    format!(
        "Aplica la siguiente instrucción de edición al documento de caso de uso, \
         conservando su estructura y sus secciones obligatorias. Envuelve el \
         resultado entre <documento> y </documento>.\n\n\
         Instrucción: {instruction}\n\n\
         Documento actual:\n{existing}"
    )
}

/// Test-case generation prompt: pipe-separated rows the parser expects.
pub fn build_test_prompt(record: &FormRecord) -> String {
    format!(
        "Genera casos de prueba para el siguiente caso de uso. Devuelve una línea \
         por paso con el formato: número. acción | datos de entrada | resultado \
         esperado. No agregues encabezados ni comentarios.\n\n\
         Datos del formulario:\n{}",
        serialize_form_block(record),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate::tests::sample_entity_record;

    #[test]
    fn form_block_carries_every_non_empty_field_verbatim() {
        let record = sample_entity_record();
        let block = serialize_form_block(&record);
        assert!(block.contains("Cliente: Acme"));
        assert!(block.contains("Proyecto: Portal Clientes"));
        assert!(block.contains("Código del caso de uso: CU001"));
        assert!(block.contains("Filtros de búsqueda: DNI, Estado"));
        assert!(block.contains("Columnas de resultado: ID, Nombre"));
        assert!(block.contains("- nombre (text, obligatorio)"));
    }

    #[test]
    fn empty_fields_are_omitted_from_the_block() {
        let record = sample_entity_record();
        let block = serialize_form_block(&record);
        assert!(!block.contains("Endpoint:"));
        assert!(!block.contains("Frecuencia:"));
    }

    #[test]
    fn document_prompt_names_both_mandatory_sections() {
        let prompt = build_document_prompt(&sample_entity_record());
        assert!(prompt.contains("Flujo principal de eventos"));
        assert!(prompt.contains("Flujos alternativos"));
        assert!(prompt.contains("<documento>"));
    }

    #[test]
    fn rulebook_differs_per_type() {
        assert_ne!(rulebook_for(UseCaseType::Entity), rulebook_for(UseCaseType::Api));
        assert_ne!(rulebook_for(UseCaseType::Api), rulebook_for(UseCaseType::Service));
    }

    #[test]
    fn field_rules_cover_every_field_type() {
        for t in [
            FieldType::Text,
            FieldType::Number,
            FieldType::Decimal,
            FieldType::Date,
            FieldType::Datetime,
            FieldType::Boolean,
            FieldType::Email,
        ] {
            assert!(!field_rule_for(t).is_empty());
        }
    }

    #[test]
    fn expansion_prompt_demands_two_paragraphs() {
        let prompt = build_expansion_prompt("Consulta básica", "Consultar clientes");
        assert!(prompt.contains("exactamente dos párrafos"));
        assert!(prompt.contains("Consulta básica"));
    }

    #[test]
    fn improvement_prompt_embeds_value_and_rule() {
        let prompt =
            build_field_improvement_prompt("descripcion", FieldType::Email, "mail", "alta de usuario");
        assert!(prompt.contains("Valor actual: mail"));
        assert!(prompt.contains("correo electrónico"));
        assert!(prompt.contains("Contexto: alta de usuario"));
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(word_count("uno dos   tres\ncuatro"), 4);
        assert_eq!(word_count(""), 0);
    }
}
