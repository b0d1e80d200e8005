//! The individual sanitizer passes. Each is a pure, idempotent
//! string→string function, independently testable.

use std::sync::LazyLock;

use regex::Regex;

use super::enforcer::{ALT_FLOWS_MARKER, MAIN_FLOW_MARKER};

/// File-name-shaped tokens (code prefix) accidentally given an extension.
static FILE_EXTENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{2,4}\d{3}[A-Za-z0-9]*)\.(docx|doc|pdf|json|txt|xlsx|xls)\b").unwrap()
});

/// Conversational filler openers, lowercase. A line starting with one of
/// these is dropped without touching surrounding content.
const FILLER_OPENERS: &[&str] = &[
    "hola",
    "claro",
    "por supuesto",
    "aquí tienes",
    "aqui tienes",
    "a continuación te presento",
    "a continuacion te presento",
    "este es el documento",
    "he actualizado el documento",
    "espero que",
    "si necesitas",
    "no dudes en",
    "cualquier otra cosa",
    "here is",
    "here's",
    "sure,",
    "certainly",
    "let me know",
];

/// Strip accidental file extensions from file-name-shaped tokens.
pub fn strip_file_extensions(text: &str) -> String {
    FILE_EXTENSION_PATTERN.replace_all(text, "$1").into_owned()
}

/// Remove a fixed catalogue of conversational filler lines.
pub fn strip_conversational_filler(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let lower = line.trim().to_lowercase();
            !FILLER_OPENERS.iter().any(|opener| lower.starts_with(opener))
        })
        .collect();
    kept.join("\n")
}

/// Remove decorative separators, code fences, and raw stylesheet-looking
/// lines. Guard: a line carrying either mandatory section marker is never
/// removed, whatever else it looks like.
pub fn strip_decorative_noise(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            let lower = trimmed.to_lowercase();
            if lower.contains(MAIN_FLOW_MARKER) || lower.contains(ALT_FLOWS_MARKER) {
                return true;
            }
            !(is_separator(trimmed) || is_code_fence(trimmed) || is_stylesheet_like(trimmed))
        })
        .collect();
    kept.join("\n")
}

fn is_separator(trimmed: &str) -> bool {
    trimmed.len() >= 3
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | '=' | '*' | '_' | '~' | '─' | '═' | '•'))
}

fn is_code_fence(trimmed: &str) -> bool {
    trimmed.starts_with("```")
}

fn is_stylesheet_like(trimmed: &str) -> bool {
    ((trimmed.starts_with('.') || trimmed.starts_with('#')) && trimmed.contains('{'))
        || (trimmed.contains(':') && trimmed.ends_with(';'))
        || trimmed.starts_with("<style")
        || trimmed.starts_with("</style")
}

/// Clip to the substring between the first structural opening tag and the
/// last structural closing tag, discarding narration outside them. No-op
/// when either tag is missing.
pub fn clip_to_document(text: &str) -> String {
    let open = match text.find("<documento>") {
        Some(pos) => pos + "<documento>".len(),
        None => return text.to_string(),
    };
    let close = match text.rfind("</documento>") {
        Some(pos) if pos >= open => pos,
        _ => return text.to_string(),
    };
    text[open..close].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_extension_stripped_from_code_token() {
        assert_eq!(strip_file_extensions("AB123Demo.json"), "AB123Demo");
        assert_eq!(strip_file_extensions("ver AB123Demo.docx ahora"), "ver AB123Demo ahora");
    }

    #[test]
    fn file_extension_pass_is_idempotent() {
        let once = strip_file_extensions("AB123Demo.json");
        assert_eq!(strip_file_extensions(&once), once);
    }

    #[test]
    fn ordinary_file_names_untouched() {
        assert_eq!(strip_file_extensions("informe.pdf"), "informe.pdf");
    }

    #[test]
    fn filler_lines_dropped_content_kept() {
        let input = "Claro, aquí tienes el documento solicitado:\nFlujo principal de eventos\nEspero que te sea útil.";
        let cleaned = strip_conversational_filler(input);
        assert_eq!(cleaned, "Flujo principal de eventos");
    }

    #[test]
    fn filler_match_is_prefix_only() {
        let input = "El usuario saluda con hola al ingresar";
        assert_eq!(strip_conversational_filler(input), input);
    }

    #[test]
    fn separators_and_fences_removed() {
        let input = "Texto útil\n---\n```\ncontenido\n```\n====\nMás texto";
        let cleaned = strip_decorative_noise(input);
        assert_eq!(cleaned, "Texto útil\ncontenido\nMás texto");
    }

    #[test]
    fn stylesheet_lines_removed() {
        let input = ".titulo { font-weight: bold }\ncolor: red;\nContenido real";
        let cleaned = strip_decorative_noise(input);
        assert_eq!(cleaned, "Contenido real");
    }

    #[test]
    fn guard_protects_section_markers() {
        // A marker line that would otherwise look like noise must survive.
        let input = "--- Flujo principal de eventos ---\n-----";
        let cleaned = strip_decorative_noise(input);
        assert!(cleaned.to_lowercase().contains("flujo principal de eventos"));
        assert!(!cleaned.contains("-----"));
    }

    #[test]
    fn clip_keeps_inner_content_only() {
        let input = "Narración previa\n<documento>\nCuerpo del documento\n</documento>\nDespedida";
        assert_eq!(clip_to_document(input), "Cuerpo del documento");
    }

    #[test]
    fn clip_uses_last_closing_tag() {
        let input = "<documento>uno</documento>texto<documento>dos</documento>";
        assert_eq!(clip_to_document(input), "uno</documento>texto<documento>dos");
    }

    #[test]
    fn clip_without_tags_is_noop() {
        assert_eq!(clip_to_document("sin etiquetas"), "sin etiquetas");
        assert_eq!(clip_to_document("<documento>sin cierre"), "<documento>sin cierre");
    }
}
