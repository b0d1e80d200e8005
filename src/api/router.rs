//! HTTP router. Routes are nested under `/api/`.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/usecases", get(endpoints::usecases::list))
        .route("/usecases/generate", post(endpoints::usecases::generate))
        .route("/usecases/export", post(endpoints::export::export))
        .route("/usecases/:id", get(endpoints::usecases::detail))
        .route("/usecases/:id/edit", post(endpoints::usecases::edit))
        .route(
            "/usecases/:id/testcases",
            post(endpoints::usecases::testcases),
        )
        .route("/fields/improve", post(endpoints::fields::improve))
        .route("/minutes/analyze", post(endpoints::minutes::analyze))
        .route("/wireframes", post(endpoints::wireframes::create))
        .with_state(state);

    Router::new().nest("/api", api).layer(CorsLayer::permissive())
}
