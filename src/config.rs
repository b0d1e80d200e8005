use std::net::SocketAddr;

use crate::providers::DEFAULT_FALLBACK_ORDER;

/// Application-level constants
pub const APP_NAME: &str = "casedoc";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8920";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("{APP_NAME}=info,tower_http=info")
}

/// Runtime configuration, read once from the environment at startup.
/// Missing provider keys are tolerated: the provider simply is not
/// registered and the fallback chain skips it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub openai_api_key: String,
    pub gemini_api_key: String,
    pub deepseek_api_key: String,
    /// Global fallback order, overridable via `CASEDOC_PROVIDER_ORDER`
    /// (comma-separated provider ids).
    pub provider_order: Vec<String>,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env_or("CASEDOC_BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr)?;

        let request_timeout_secs = match std::env::var("CASEDOC_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidTimeout(raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            openai_api_key: env_or("CASEDOC_OPENAI_API_KEY", ""),
            gemini_api_key: env_or("CASEDOC_GEMINI_API_KEY", ""),
            deepseek_api_key: env_or("CASEDOC_DEEPSEEK_API_KEY", ""),
            provider_order: provider_order_from(&env_or("CASEDOC_PROVIDER_ORDER", "")),
            request_timeout_secs,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8920)),
            openai_api_key: String::new(),
            gemini_api_key: String::new(),
            deepseek_api_key: String::new(),
            provider_order: default_order(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CASEDOC_BIND_ADDR is not a valid socket address")]
    InvalidBindAddr,

    #[error("CASEDOC_TIMEOUT_SECS is not a number: '{0}'")]
    InvalidTimeout(String),
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn default_order() -> Vec<String> {
    DEFAULT_FALLBACK_ORDER.iter().map(|s| s.to_string()).collect()
}

fn provider_order_from(raw: &str) -> Vec<String> {
    let order: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect();
    if order.is_empty() {
        default_order()
    } else {
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_order_falls_back_to_default() {
        assert_eq!(provider_order_from(""), vec!["openai", "gemini", "deepseek"]);
    }

    #[test]
    fn custom_order_is_parsed_and_lowercased() {
        assert_eq!(
            provider_order_from(" Gemini , deepseek "),
            vec!["gemini", "deepseek"]
        );
    }

    #[test]
    fn default_config_binds_locally() {
        let config = AppConfig::default();
        assert!(config.bind_addr.ip().is_loopback());
        assert!(config.openai_api_key.is_empty());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }
}
