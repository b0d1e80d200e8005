pub mod gemini;
pub mod offline;
pub mod openai;

pub use gemini::*;
pub use offline::*;
pub use openai::*;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

/// Reserved provider id that bypasses prompt construction and every network
/// adapter, returning deterministic local content.
pub const OFFLINE_PROVIDER_ID: &str = "offline";

/// Fixed global fallback order. The user-selected provider always goes first;
/// the remaining variants follow in this order. Overridable via config.
pub const DEFAULT_FALLBACK_ORDER: &[&str] = &["openai", "gemini", "deepseek"];

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("cannot reach provider at {0}")]
    Connection(String),

    #[error("provider returned error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("missing credentials for provider '{0}'")]
    MissingCredentials(String),

    #[error("response parsing error: {0}")]
    ResponseParsing(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// One interchangeable text-generation backend. Text in, text out; exactly
/// one attempt per task — the fallback chain is the only redundancy.
pub trait TextProvider: Send + Sync {
    fn id(&self) -> &str;
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, ProviderError>;
}

/// Explicit provider registry injected into the orchestrator at construction.
/// Replaces per-process lazily-cached client singletons so tests can
/// substitute fakes freely.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn TextProvider>>,
    fallback_order: Vec<String>,
}

impl ProviderRegistry {
    pub fn new(fallback_order: Vec<String>) -> Self {
        Self {
            providers: HashMap::new(),
            fallback_order,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_FALLBACK_ORDER.iter().map(|s| s.to_string()).collect())
    }

    pub fn register(&mut self, provider: Arc<dyn TextProvider>) {
        self.providers.insert(provider.id().to_string(), provider);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn TextProvider>> {
        self.providers.get(id).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Prioritized chain for one task: the selected provider first, then the
    /// remaining registered variants in the fixed global order.
    pub fn chain_for(&self, selected: &str) -> Vec<Arc<dyn TextProvider>> {
        let mut chain = Vec::with_capacity(self.providers.len());
        let mut seen = Vec::new();

        if let Some(p) = self.get(selected) {
            seen.push(selected.to_string());
            chain.push(p);
        }
        for id in &self.fallback_order {
            if seen.iter().any(|s| s == id) {
                continue;
            }
            if let Some(p) = self.get(id) {
                seen.push(id.clone());
                chain.push(p);
            }
        }
        chain
    }
}

/// Scripted provider for tests: a queue of canned outcomes plus a call
/// counter, so fallback behavior and zero-call guarantees can be asserted.
pub struct MockProvider {
    id: String,
    outcome: Result<String, String>,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockProvider {
    pub fn succeeding(id: &str, response: &str) -> Self {
        Self {
            id: id.to_string(),
            outcome: Ok(response.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(id: &str, reason: &str) -> Self {
        Self {
            id: id.to_string(),
            outcome: Err(reason.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl TextProvider for MockProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(ProviderError::HttpClient(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(ids: &[&str]) -> ProviderRegistry {
        let mut registry = ProviderRegistry::with_defaults();
        for id in ids {
            registry.register(Arc::new(MockProvider::succeeding(id, "ok")));
        }
        registry
    }

    #[test]
    fn chain_puts_selected_provider_first() {
        let registry = registry_with(&["openai", "gemini", "deepseek"]);
        let chain = registry.chain_for("gemini");
        let ids: Vec<_> = chain.iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, vec!["gemini", "openai", "deepseek"]);
    }

    #[test]
    fn chain_without_selection_follows_global_order() {
        let registry = registry_with(&["deepseek", "openai", "gemini"]);
        let chain = registry.chain_for("unknown");
        let ids: Vec<_> = chain.iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, vec!["openai", "gemini", "deepseek"]);
    }

    #[test]
    fn chain_never_repeats_the_selected_provider() {
        let registry = registry_with(&["openai", "gemini"]);
        let chain = registry.chain_for("openai");
        let ids: Vec<_> = chain.iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, vec!["openai", "gemini"]);
    }

    #[test]
    fn unregistered_providers_are_skipped() {
        let registry = registry_with(&["gemini"]);
        let chain = registry.chain_for("openai");
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].id(), "gemini");
    }

    #[test]
    fn mock_provider_counts_calls() {
        let provider = MockProvider::succeeding("openai", "hola");
        assert_eq!(provider.call_count(), 0);
        provider.generate("x", 10).unwrap();
        provider.generate("y", 10).unwrap();
        assert_eq!(provider.call_count(), 2);
    }
}
