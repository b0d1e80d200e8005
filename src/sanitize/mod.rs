//! Provider-response sanitization: an ordered pipeline of named, idempotent
//! string→string passes, plus the section enforcer that guarantees the two
//! mandatory headings for `api` documents.

pub mod enforcer;
pub mod passes;

pub use enforcer::*;
pub use passes::*;

/// One named pass. The name shows up in logs so a formatting quirk can be
/// traced to the pass that removed (or failed to remove) it.
pub struct SanitizePass {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Pass order is part of the contract: clipping runs last so earlier passes
/// see the provider's full output.
pub const PASSES: &[SanitizePass] = &[
    SanitizePass {
        name: "strip_file_extensions",
        apply: passes::strip_file_extensions,
    },
    SanitizePass {
        name: "strip_conversational_filler",
        apply: passes::strip_conversational_filler,
    },
    SanitizePass {
        name: "strip_decorative_noise",
        apply: passes::strip_decorative_noise,
    },
    SanitizePass {
        name: "clip_to_document",
        apply: passes::clip_to_document,
    },
];

/// Run every pass in order. Idempotent: sanitized output passes through
/// unchanged.
pub fn sanitize_response(raw: &str) -> String {
    let mut text = raw.to_string();
    for pass in PASSES {
        let cleaned = (pass.apply)(&text);
        if cleaned != text {
            tracing::debug!(pass = pass.name, "sanitizer pass modified provider output");
        }
        text = cleaned;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_is_idempotent() {
        let raw = "Claro, aquí tienes el documento:\n<documento>\nFlujo principal de eventos\n1. Paso uno con AB123Demo.json\n</documento>\nEspero que te sirva.";
        let once = sanitize_response(raw);
        let twice = sanitize_response(&once);
        assert_eq!(once, twice);
        assert!(once.contains("AB123Demo"));
        assert!(!once.contains(".json"));
        assert!(!once.contains("aquí tienes"));
    }

    #[test]
    fn passes_run_in_declared_order() {
        let names: Vec<_> = PASSES.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "strip_file_extensions",
                "strip_conversational_filler",
                "strip_decorative_noise",
                "clip_to_document"
            ]
        );
    }
}
