//! Section enforcer for `api` documents: guarantees both mandatory headings
//! exist, appending a canonical fallback block when a provider omitted one.
//! Re-running over content that already carries both markers is a no-op.

/// Literal marker phrases, lowercase, tested case-insensitively.
pub const MAIN_FLOW_MARKER: &str = "flujo principal de eventos";
pub const ALT_FLOWS_MARKER: &str = "flujos alternativos";

/// Canonical main-flow fallback: nested numbered sub-steps.
const MAIN_FLOW_FALLBACK: &str = "\
Flujo principal de eventos\n\
1. El cliente envía la petición al endpoint del servicio.\n\
a. El sistema valida el formato y los campos obligatorios de la petición.\n\
b. El sistema autentica y autoriza al consumidor.\n\
2. El sistema procesa la petición según las reglas de negocio.\n\
a. El sistema ejecuta la operación solicitada.\n\
b. El sistema registra la operación en la bitácora.\n\
3. El sistema devuelve la respuesta con el código 200 y el cuerpo acordado.";

/// Canonical alternative-flows fallback: standard HTTP status alternatives.
const ALT_FLOWS_FALLBACK: &str = "\
Flujos alternativos\n\
1. Petición inválida\n\
a. El sistema detecta datos faltantes o con formato incorrecto.\n\
b. El sistema registra el detalle del error.\n\
c. El sistema devuelve el código 400 con los mensajes de validación.\n\
2. No autorizado\n\
a. El sistema detecta credenciales ausentes o inválidas.\n\
b. El sistema registra el intento.\n\
c. El sistema devuelve el código 401.\n\
3. Recurso no encontrado\n\
a. El sistema no localiza el recurso solicitado.\n\
b. El sistema registra la búsqueda fallida.\n\
c. El sistema devuelve el código 404.\n\
4. Error interno\n\
a. El sistema captura la excepción no controlada.\n\
b. El sistema registra el error con su traza.\n\
c. El sistema devuelve el código 500.";

pub fn has_main_flow(content: &str) -> bool {
    content.to_lowercase().contains(MAIN_FLOW_MARKER)
}

pub fn has_alt_flows(content: &str) -> bool {
    content.to_lowercase().contains(ALT_FLOWS_MARKER)
}

/// Append the canonical block for each missing marker. Idempotent by
/// construction: the appended block contains its own marker, so a second run
/// finds both and changes nothing.
pub fn enforce_api_sections(content: &str) -> String {
    let mut result = content.trim_end().to_string();

    if !has_main_flow(&result) {
        tracing::warn!("provider output missing main event flow, appending canonical block");
        if !result.is_empty() {
            result.push_str("\n\n");
        }
        result.push_str(MAIN_FLOW_FALLBACK);
    }

    if !has_alt_flows(&result) {
        tracing::warn!("provider output missing alternative flows, appending canonical block");
        if !result.is_empty() {
            result.push_str("\n\n");
        }
        result.push_str(ALT_FLOWS_FALLBACK);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_content_is_untouched() {
        let content = "Flujo principal de eventos\n1. Paso.\n\nFlujos alternativos\n1. Error.";
        assert_eq!(enforce_api_sections(content), content);
    }

    #[test]
    fn missing_main_flow_is_appended() {
        let content = "Flujos alternativos\n1. Error.";
        let enforced = enforce_api_sections(content);
        assert!(has_main_flow(&enforced));
        assert!(enforced.contains("código 200"));
    }

    #[test]
    fn missing_alt_flows_appends_http_catalogue() {
        let content = "Flujo principal de eventos\n1. Paso.";
        let enforced = enforce_api_sections(content);
        assert!(has_alt_flows(&enforced));
        for code in ["400", "401", "404", "500"] {
            assert!(enforced.contains(code), "missing status {code}");
        }
    }

    #[test]
    fn both_missing_appends_both_in_order() {
        let enforced = enforce_api_sections("Texto sin secciones.");
        let main = enforced.to_lowercase().find(MAIN_FLOW_MARKER).unwrap();
        let alt = enforced.to_lowercase().find(ALT_FLOWS_MARKER).unwrap();
        assert!(main < alt);
    }

    #[test]
    fn enforcement_is_idempotent() {
        let once = enforce_api_sections("Texto sin secciones.");
        let twice = enforce_api_sections(&once);
        assert_eq!(once, twice);
        // The appended block never duplicates.
        assert_eq!(twice.to_lowercase().matches(MAIN_FLOW_MARKER).count(), 1);
        assert_eq!(twice.to_lowercase().matches(ALT_FLOWS_MARKER).count(), 1);
    }

    #[test]
    fn marker_detection_is_case_insensitive() {
        assert!(has_main_flow("FLUJO PRINCIPAL DE EVENTOS"));
        assert!(has_alt_flows("Flujos Alternativos"));
    }
}
