pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;

use crate::config::RelayConfig;
use crate::services::relay::TranscriptionRelay;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::transcribe::transcribe,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::transcribe::TranscribeForm,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "audio", description = "Audio transcription relay"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<TranscriptionRelay>,
    pub config: RelayConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/audio/api/transcribe",
            post(api::handlers::transcribe::transcribe)
                .layer(DefaultBodyLimit::max(state.config.body_limit())),
        )
        .layer(from_fn(api::middleware::metrics::metrics_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
        .with_state(state)
}
