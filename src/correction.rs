//! Accent correction for user- and provider-originated Spanish prose.
//!
//! Applies a curated {missing-accent form → corrected form} table to whole
//! tokens, case-preserving. Identifier-shaped tokens (codes, camelCase,
//! snake_case, file names, technical loanwords) are never touched, so field
//! names and sample data survive intact. Never applied to literal structural
//! text authored by the assembly engine itself.

/// Accent rules, lowercase. Sorted for binary search.
const ACCENT_RULES: &[(&str, &str)] = &[
    ("actualizacion", "actualización"),
    ("administracion", "administración"),
    ("aplicacion", "aplicación"),
    ("autenticacion", "autenticación"),
    ("automatica", "automática"),
    ("automatico", "automático"),
    ("basica", "básica"),
    ("basico", "básico"),
    ("busqueda", "búsqueda"),
    ("codigo", "código"),
    ("configuracion", "configuración"),
    ("creacion", "creación"),
    ("descripcion", "descripción"),
    ("direccion", "dirección"),
    ("edicion", "edición"),
    ("ejecucion", "ejecución"),
    ("eliminacion", "eliminación"),
    ("especificacion", "especificación"),
    ("estandar", "estándar"),
    ("generacion", "generación"),
    ("gestion", "gestión"),
    ("informacion", "información"),
    ("integracion", "integración"),
    ("logica", "lógica"),
    ("modulo", "módulo"),
    ("numero", "número"),
    ("operacion", "operación"),
    ("pagina", "página"),
    ("parametro", "parámetro"),
    ("parametros", "parámetros"),
    ("peticion", "petición"),
    ("precondicion", "precondición"),
    ("relacion", "relación"),
    ("revision", "revisión"),
    ("sesion", "sesión"),
    ("validacion", "validación"),
    ("version", "versión"),
];

/// Technical loanwords that look like Spanish prose candidates but must stay
/// untouched. Lowercase, sorted for binary search.
const LOANWORDS: &[&str] = &[
    "api", "backend", "backoffice", "batch", "body", "dashboard", "email",
    "endpoint", "framework", "frontend", "hosting", "json", "login", "logout",
    "mock", "offline", "online", "password", "request", "response", "server",
    "string", "token", "upload", "xml",
];

/// Correct every free-text field of a record in place. Identifier fields
/// (codes, file names, endpoints, paths) are left alone.
pub fn correct_record(record: &mut crate::models::FormRecord) {
    record.client = correct_accents(&record.client);
    record.project = correct_accents(&record.project);
    record.use_case_name = correct_accents(&record.use_case_name);
    record.description = correct_accents(&record.description);
    record.business_rules = correct_accents(&record.business_rules);
    record.special_requirements = correct_accents(&record.special_requirements);
    record.preconditions = correct_accents(&record.preconditions);
    record.postconditions = correct_accents(&record.postconditions);
}

/// Apply accent correction to free text. Idempotent: corrected output maps
/// to itself on a second pass.
pub fn correct_accents(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 8);
    let mut token = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '-' || ch == '.' {
            token.push(ch);
        } else {
            flush_token(&mut result, &mut token);
            result.push(ch);
        }
    }
    flush_token(&mut result, &mut token);

    result
}

fn flush_token(result: &mut String, token: &mut String) {
    if token.is_empty() {
        return;
    }
    // Trailing punctuation collected into the token is sentence punctuation,
    // not part of the word.
    let trimmed_len = token.trim_end_matches(['.', '-', '_']).len();
    let (word, tail) = token.split_at(trimmed_len);
    result.push_str(&correct_token(word));
    result.push_str(tail);
    token.clear();
}

fn correct_token(token: &str) -> String {
    if token.is_empty() || is_excluded(token) {
        return token.to_string();
    }

    let lower = token.to_lowercase();
    match ACCENT_RULES.binary_search_by(|(from, _)| (*from).cmp(lower.as_str())) {
        Ok(idx) => apply_case(token, ACCENT_RULES[idx].1),
        Err(_) => token.to_string(),
    }
}

/// Exclusion patterns tested before any rule. A match on any of them skips
/// the token entirely.
fn is_excluded(token: &str) -> bool {
    // Alphanumeric identifiers and all-caps codes ("ST003", "CU001v2")
    if token.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }
    // snake_case, hyphenated, and file-extension-shaped tokens
    if token.contains('_') || token.contains('-') || token.contains('.') {
        return true;
    }
    // camelCase: a lowercase letter directly followed by an uppercase one
    let mut prev_lower = false;
    for c in token.chars() {
        if c.is_uppercase() && prev_lower {
            return true;
        }
        prev_lower = c.is_lowercase();
    }
    // Identifier-like tokens ending in "Id"
    if token.len() > 2 && token.ends_with("Id") {
        return true;
    }
    let lower = token.to_lowercase();
    LOANWORDS.binary_search(&lower.as_str()).is_ok()
}

/// Case rule: all-caps input → all-caps output; leading capital → capitalize
/// the replacement's first letter, lowercase the rest; otherwise lowercase.
fn apply_case(original: &str, replacement: &str) -> String {
    if original.chars().all(|c| !c.is_alphabetic() || c.is_uppercase()) {
        return replacement.to_uppercase();
    }

    let first_upper = original.chars().next().is_some_and(|c| c.is_uppercase());
    if first_upper {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(c) => {
                let mut s: String = c.to_uppercase().collect();
                s.extend(chars.flat_map(|c| c.to_lowercase()));
                s
            }
            None => replacement.to_string(),
        }
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrects_missing_accents() {
        assert_eq!(correct_accents("descripcion"), "descripción");
        assert_eq!(correct_accents("numero de pagina"), "número de página");
    }

    #[test]
    fn camel_case_token_untouched() {
        assert_eq!(correct_accents("descripcionCampo"), "descripcionCampo");
    }

    #[test]
    fn code_pattern_untouched() {
        assert_eq!(correct_accents("ST003"), "ST003");
        assert_eq!(correct_accents("CU001"), "CU001");
    }

    #[test]
    fn snake_and_hyphen_tokens_untouched() {
        assert_eq!(correct_accents("descripcion_campo"), "descripcion_campo");
        assert_eq!(correct_accents("pre-validacion"), "pre-validacion");
    }

    #[test]
    fn id_suffix_untouched() {
        assert_eq!(correct_accents("descripcionId"), "descripcionId");
    }

    #[test]
    fn file_extension_token_untouched() {
        assert_eq!(correct_accents("descripcion.json"), "descripcion.json");
    }

    #[test]
    fn loanwords_untouched() {
        assert_eq!(correct_accents("el endpoint devuelve json"), "el endpoint devuelve json");
    }

    #[test]
    fn case_preserved() {
        assert_eq!(correct_accents("DESCRIPCION"), "DESCRIPCIÓN");
        assert_eq!(correct_accents("Descripcion"), "Descripción");
        assert_eq!(correct_accents("descripcion"), "descripción");
    }

    #[test]
    fn trailing_punctuation_does_not_shield_the_word() {
        assert_eq!(correct_accents("la descripcion."), "la descripción.");
        assert_eq!(correct_accents("codigo,"), "código,");
    }

    #[test]
    fn idempotent_on_corrected_text() {
        let once = correct_accents("La descripcion del modulo de gestion");
        let twice = correct_accents(&once);
        assert_eq!(once, "La descripción del módulo de gestión");
        assert_eq!(once, twice);
    }

    #[test]
    fn mixed_prose_and_identifiers() {
        let input = "Validacion del campo descripcionCampo segun ST003";
        let result = correct_accents(input);
        assert_eq!(result, "Validación del campo descripcionCampo segun ST003");
    }

    #[test]
    fn rules_sorted_for_binary_search() {
        for window in ACCENT_RULES.windows(2) {
            assert!(window[0].0 < window[1].0, "{:?} >= {:?}", window[0].0, window[1].0);
        }
        for window in LOANWORDS.windows(2) {
            assert!(window[0] < window[1]);
        }
    }
}
