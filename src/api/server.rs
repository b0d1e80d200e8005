//! Server lifecycle: build the provider registry from configuration, mount
//! the router, serve until the process ends.

use std::sync::Arc;

use crate::api::router::build_router;
use crate::api::types::AppState;
use crate::config::AppConfig;
use crate::generation::Orchestrator;
use crate::providers::{ChatCompletionsProvider, GeminiProvider, ProviderRegistry};
use crate::store::RecordStore;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Build shared state from configuration. Providers without credentials are
/// not registered; the offline provider id needs no registration.
pub fn build_state(config: &AppConfig) -> AppState {
    let registry = build_registry(config);
    if registry.is_empty() {
        tracing::warn!("no provider credentials configured, only offline generation will work");
    }

    AppState::new(
        Arc::new(RecordStore::new()),
        Arc::new(Orchestrator::new(Arc::new(registry))),
    )
}

pub fn build_registry(config: &AppConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new(config.provider_order.clone());
    let timeout = config.request_timeout_secs;

    if !config.openai_api_key.is_empty() {
        match ChatCompletionsProvider::openai(&config.openai_api_key, timeout) {
            Ok(p) => registry.register(Arc::new(p)),
            Err(e) => tracing::warn!(error = %e, "openai provider not registered"),
        }
    }
    if !config.gemini_api_key.is_empty() {
        match GeminiProvider::with_key(&config.gemini_api_key, timeout) {
            Ok(p) => registry.register(Arc::new(p)),
            Err(e) => tracing::warn!(error = %e, "gemini provider not registered"),
        }
    }
    if !config.deepseek_api_key.is_empty() {
        match ChatCompletionsProvider::deepseek(&config.deepseek_api_key, timeout) {
            Ok(p) => registry.register(Arc::new(p)),
            Err(e) => tracing::warn!(error = %e, "deepseek provider not registered"),
        }
    }
    registry
}

/// Bind and serve the API. Runs until the task is aborted or the listener
/// fails.
pub async fn serve(config: AppConfig) -> Result<(), ServeError> {
    // Blocking HTTP clients are constructed off the async runtime.
    let state = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || build_state(&config))
            .await
            .map_err(|e| ServeError::Serve(std::io::Error::other(e)))?
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "casedoc API listening");
    }

    axum::serve(listener, app).await.map_err(ServeError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_without_credentials_has_an_empty_registry() {
        let state = build_state(&AppConfig::default());
        // Offline generation still works through the orchestrator.
        let task = crate::models::GenerationTask {
            provider_id: crate::providers::OFFLINE_PROVIDER_ID.to_string(),
            kind: crate::models::TaskKind::Document,
            payload: String::new(),
        };
        assert!(state.orchestrator.run(&task).is_ok());
    }

    #[test]
    fn configured_keys_register_their_providers() {
        let config = AppConfig {
            openai_api_key: "sk-test".into(),
            gemini_api_key: "g-test".into(),
            ..AppConfig::default()
        };
        let registry = build_registry(&config);
        assert!(registry.get("openai").is_some());
        assert!(registry.get("gemini").is_some());
        assert!(registry.get("deepseek").is_none());
    }
}
