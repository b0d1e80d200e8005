//! The generation orchestrator: a state machine over the prioritized
//! provider list. One attempt per provider, no backoff; the fallback list
//! itself is the only redundancy mechanism. Calls run sequentially — never
//! raced — so a task never produces duplicate billable calls.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{FormRecord, GenerationTask, ProviderAttempt, TaskKind, UseCaseType};
use crate::providers::{offline, ProviderRegistry, OFFLINE_PROVIDER_ID};
use crate::sanitize;

use super::classify::token_budget;
use super::prompt;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("all providers failed: {}", describe_attempts(attempts))]
    AllProvidersFailed { attempts: Vec<ProviderAttempt> },

    #[error("no providers registered and offline mode not requested")]
    NoProvidersConfigured,
}

fn describe_attempts(attempts: &[ProviderAttempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.provider, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

pub struct Orchestrator {
    registry: Arc<ProviderRegistry>,
}

impl Orchestrator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Run one task through the fallback chain. The offline provider id is
    /// checked before anything else and bypasses prompt dispatch entirely.
    pub fn run(&self, task: &GenerationTask) -> Result<String, GenerationError> {
        if task.provider_id == OFFLINE_PROVIDER_ID {
            tracing::info!(kind = task.kind.as_str(), "serving task from offline provider");
            return Ok(offline::content_for(task.kind));
        }

        let chain = self.registry.chain_for(&task.provider_id);
        if chain.is_empty() {
            return Err(GenerationError::NoProvidersConfigured);
        }

        let budget = token_budget(task.kind);
        let mut attempts: Vec<ProviderAttempt> = Vec::new();

        for provider in chain {
            match provider.generate(&task.payload, budget) {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::info!(
                        provider = provider.id(),
                        kind = task.kind.as_str(),
                        fallbacks = attempts.len(),
                        "generation succeeded"
                    );
                    return Ok(text);
                }
                Ok(_) => {
                    tracing::warn!(provider = provider.id(), "provider returned empty response");
                    attempts.push(ProviderAttempt {
                        provider: provider.id().to_string(),
                        reason: "empty response".to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(provider = provider.id(), error = %e, "provider failed");
                    attempts.push(ProviderAttempt {
                        provider: provider.id().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(GenerationError::AllProvidersFailed { attempts })
    }

    /// Generate the sanitized document body for a record. Applies the
    /// short-description expansion side condition, then the sanitizer
    /// pipeline, then (for `api`) the section enforcer — so assembly always
    /// consumes enforced content.
    pub fn generate_document(
        &self,
        record: &mut FormRecord,
        provider_id: &str,
    ) -> Result<String, GenerationError> {
        // Offline skips the expansion sub-task and prompt construction
        // entirely; its content is deterministic per task kind.
        if provider_id == OFFLINE_PROVIDER_ID {
            tracing::info!("serving document from offline provider");
            let raw = offline::content_for(TaskKind::Document);
            return Ok(self.finish(record.use_case_type, &raw));
        }

        self.expand_short_description(record, provider_id);

        let task = GenerationTask {
            provider_id: provider_id.to_string(),
            kind: TaskKind::Document,
            payload: prompt::build_document_prompt(record),
        };
        let raw = self.run(&task)?;
        Ok(self.finish(record.use_case_type, &raw))
    }

    /// Re-run generation over existing content with an edit instruction.
    pub fn edit_document(
        &self,
        record: &FormRecord,
        existing: &str,
        instruction: &str,
        provider_id: &str,
    ) -> Result<String, GenerationError> {
        let task = GenerationTask {
            provider_id: provider_id.to_string(),
            kind: TaskKind::Document,
            payload: prompt::build_edit_prompt(existing, instruction),
        };
        let raw = self.run(&task)?;
        Ok(self.finish(record.use_case_type, &raw))
    }

    /// Improve a single field. Never fails: internal errors degrade to the
    /// offline canned improvement.
    pub fn improve_field(
        &self,
        field_name: &str,
        field_type: crate::models::FieldType,
        value: &str,
        context: &str,
        provider_id: &str,
    ) -> String {
        let task = GenerationTask {
            provider_id: provider_id.to_string(),
            kind: TaskKind::FieldImprovement,
            payload: prompt::build_field_improvement_prompt(field_name, field_type, value, context),
        };
        match self.run(&task) {
            Ok(text) => {
                let cleaned = sanitize::strip_conversational_filler(&text);
                let cleaned = cleaned.trim();
                if cleaned.is_empty() {
                    offline::improved_field(value)
                } else {
                    cleaned.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, field = field_name, "field improvement degraded to offline content");
                offline::improved_field(value)
            }
        }
    }

    fn finish(&self, use_case_type: UseCaseType, raw: &str) -> String {
        let sanitized = sanitize::sanitize_response(raw);
        if use_case_type == UseCaseType::Api {
            sanitize::enforce_api_sections(&sanitized)
        } else {
            sanitized
        }
    }

    /// Side condition: a description under ~50 words is expanded once via a
    /// one-shot sub-task, and the result permanently replaces the
    /// description used by every later prompt for this request. Not
    /// recursive, not repeated; failure keeps the original text.
    fn expand_short_description(&self, record: &mut FormRecord, provider_id: &str) {
        if prompt::word_count(&record.description) >= prompt::SHORT_DESCRIPTION_WORDS {
            return;
        }
        let task = GenerationTask {
            provider_id: provider_id.to_string(),
            kind: TaskKind::Expansion,
            payload: prompt::build_expansion_prompt(&record.description, &record.use_case_name),
        };
        match self.run(&task) {
            Ok(expanded) => {
                let expanded = sanitize::strip_conversational_filler(&expanded);
                let expanded = expanded.trim();
                if !expanded.is_empty() {
                    record.description = expanded.to_string();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "description expansion failed, keeping original text");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate::tests::sample_entity_record;
    use crate::providers::{MockProvider, TextProvider};

    fn registry(providers: Vec<Arc<MockProvider>>) -> Arc<ProviderRegistry> {
        let order = providers.iter().map(|p| p.id().to_string()).collect();
        let mut registry = ProviderRegistry::new(order);
        for p in providers {
            registry.register(p);
        }
        Arc::new(registry)
    }

    fn task(provider_id: &str) -> GenerationTask {
        GenerationTask {
            provider_id: provider_id.to_string(),
            kind: TaskKind::Document,
            payload: "prompt".to_string(),
        }
    }

    #[test]
    fn first_success_stops_the_chain() {
        let p1 = Arc::new(MockProvider::failing("p1", "timeout"));
        let p2 = Arc::new(MockProvider::succeeding("p2", "result"));
        let p3 = Arc::new(MockProvider::succeeding("p3", "never used"));
        let orch = Orchestrator::new(registry(vec![p1.clone(), p2.clone(), p3.clone()]));

        let result = orch.run(&task("p1")).unwrap();
        assert_eq!(result, "result");
        assert_eq!(p1.call_count(), 1);
        assert_eq!(p2.call_count(), 1);
        assert_eq!(p3.call_count(), 0);
    }

    #[test]
    fn four_failures_then_success_yields_result() {
        let failing: Vec<Arc<MockProvider>> = (1..=4)
            .map(|i| Arc::new(MockProvider::failing(&format!("p{i}"), "boom")))
            .collect();
        let ok = Arc::new(MockProvider::succeeding("p5", "result"));
        let mut all = failing.clone();
        all.push(ok.clone());
        let orch = Orchestrator::new(registry(all));

        let result = orch.run(&task("p1")).unwrap();
        assert_eq!(result, "result");
        assert_eq!(ok.call_count(), 1);
    }

    #[test]
    fn all_failures_enumerate_every_attempt() {
        let providers: Vec<Arc<MockProvider>> = (1..=5)
            .map(|i| Arc::new(MockProvider::failing(&format!("p{i}"), format!("reason {i}").as_str())))
            .collect();
        let orch = Orchestrator::new(registry(providers));

        let err = orch.run(&task("p1")).unwrap_err();
        match err {
            GenerationError::AllProvidersFailed { attempts } => {
                assert_eq!(attempts.len(), 5);
                let providers: std::collections::HashSet<_> =
                    attempts.iter().map(|a| a.provider.as_str()).collect();
                assert_eq!(providers.len(), 5);
                assert!(attempts.iter().any(|a| a.reason.contains("reason 3")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn aggregated_error_message_lists_providers_and_reasons() {
        let p = Arc::new(MockProvider::failing("openai", "401 unauthorized"));
        let orch = Orchestrator::new(registry(vec![p]));
        let err = orch.run(&task("openai")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("openai"));
        assert!(msg.contains("401 unauthorized"));
    }

    #[test]
    fn empty_response_advances_the_chain() {
        let empty = Arc::new(MockProvider::succeeding("p1", "   "));
        let ok = Arc::new(MockProvider::succeeding("p2", "contenido"));
        let orch = Orchestrator::new(registry(vec![empty, ok]));

        let result = orch.run(&task("p1")).unwrap();
        assert_eq!(result, "contenido");
    }

    #[test]
    fn offline_id_makes_zero_adapter_calls() {
        let p1 = Arc::new(MockProvider::succeeding("p1", "red"));
        let p2 = Arc::new(MockProvider::succeeding("p2", "red"));
        let orch = Orchestrator::new(registry(vec![p1.clone(), p2.clone()]));

        let result = orch.run(&task(OFFLINE_PROVIDER_ID)).unwrap();
        assert!(!result.trim().is_empty());
        assert_eq!(p1.call_count(), 0);
        assert_eq!(p2.call_count(), 0);
    }

    #[test]
    fn short_description_is_expanded_once_and_replaced() {
        let mut record = sample_entity_record();
        record.description = "Consulta de clientes".to_string();
        let orch = Orchestrator::new(registry(vec![]));

        // Offline expansion path: deterministic two-paragraph replacement.
        orch.expand_short_description(&mut record, OFFLINE_PROVIDER_ID);
        assert!(prompt::word_count(&record.description) >= prompt::SHORT_DESCRIPTION_WORDS);

        let after_first = record.description.clone();
        orch.expand_short_description(&mut record, OFFLINE_PROVIDER_ID);
        assert_eq!(record.description, after_first);
    }

    #[test]
    fn offline_document_skips_expansion_and_adapters() {
        let p1 = Arc::new(MockProvider::succeeding("p1", "nunca usado"));
        let orch = Orchestrator::new(registry(vec![p1.clone()]));

        let mut record = sample_entity_record();
        record.description = "Corta.".into();
        let content = orch
            .generate_document(&mut record, OFFLINE_PROVIDER_ID)
            .unwrap();

        assert!(!content.is_empty());
        // The expansion sub-task never ran: the description is untouched.
        assert_eq!(record.description, "Corta.");
        assert_eq!(p1.call_count(), 0);
    }

    #[test]
    fn expansion_failure_keeps_original_description() {
        let p = Arc::new(MockProvider::failing("p1", "down"));
        let orch = Orchestrator::new(registry(vec![p]));
        let mut record = sample_entity_record();
        record.description = "Texto corto".to_string();

        orch.expand_short_description(&mut record, "p1");
        assert_eq!(record.description, "Texto corto");
    }

    #[test]
    fn api_document_generation_enforces_sections() {
        let p = Arc::new(MockProvider::succeeding(
            "p1",
            "<documento>Narrativa sin secciones obligatorias.</documento>",
        ));
        let orch = Orchestrator::new(registry(vec![p]));
        let mut record = sample_entity_record();
        record.use_case_type = UseCaseType::Api;
        record.endpoint = "/api/clientes".into();
        record.http_method = "GET".into();
        record.description = "palabra ".repeat(60);

        let content = orch.generate_document(&mut record, "p1").unwrap();
        assert!(sanitize::has_main_flow(&content));
        assert!(sanitize::has_alt_flows(&content));
    }

    #[test]
    fn entity_document_generation_sanitizes_but_does_not_enforce() {
        let p = Arc::new(MockProvider::succeeding(
            "p1",
            "Claro, aquí tienes:\n<documento>Narrativa de la entidad.</documento>",
        ));
        let orch = Orchestrator::new(registry(vec![p]));
        let mut record = sample_entity_record();
        record.description = "palabra ".repeat(60);

        let content = orch.generate_document(&mut record, "p1").unwrap();
        assert_eq!(content, "Narrativa de la entidad.");
    }

    #[test]
    fn improve_field_degrades_to_offline_on_failure() {
        let p = Arc::new(MockProvider::failing("p1", "down"));
        let orch = Orchestrator::new(registry(vec![p]));

        let improved = orch.improve_field(
            "descripcion",
            crate::models::FieldType::Text,
            "Consultar clientes",
            "",
            "p1",
        );
        assert_eq!(improved, "Consultar clientes.");
    }

    #[test]
    fn no_registered_providers_is_a_distinct_error() {
        let orch = Orchestrator::new(registry(vec![]));
        let err = orch.run(&task("p1")).unwrap_err();
        assert!(matches!(err, GenerationError::NoProvidersConfigured));
    }
}
