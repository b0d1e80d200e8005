pub mod api;
pub mod assembly;
pub mod config;
pub mod correction;
pub mod extraction;
pub mod generation;
pub mod models;
pub mod office;
pub mod providers;
pub mod sanitize;
pub mod store;
pub mod wireframe;

use tracing_subscriber::EnvFilter;

/// Initialize tracing and run the API server until it stops.
pub async fn run() -> Result<(), api::ServeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("casedoc starting v{}", config::APP_VERSION);

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration, using defaults");
            config::AppConfig::default()
        }
    };

    api::serve(config).await
}
