#![forbid(unsafe_code)]

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{any, get};
use axum::Router;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeader;

pub mod config;
mod http;
pub mod model;

pub use config::{ConfigError, DatabaseConfig, Environment, ServerConfig};

pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

/// Builds the application router.
///
/// `/api/health` is the only API route; anything else under `/api` is a JSON
/// 404. Every other path is served from the public directory, falling back
/// to `index.html` so the frontend can route on the client.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/health",
            get(http::handlers::health_handler).fallback(http::handlers::api_not_found_handler),
        )
        .fallback(http::handlers::api_not_found_handler);

    let spa = ServeDir::new(&state.config.public_dir)
        .fallback(ServeFile::new(state.config.index_file()));

    // `nest` leaves the bare trailing slash to the fallback.
    let router = Router::new()
        .route("/api/", any(http::handlers::api_not_found_handler))
        .nest("/api", api);
    let router = if state.config.environment.is_production() {
        router.fallback_service(SetResponseHeader::overriding(
            spa,
            CACHE_CONTROL,
            HeaderValue::from_static(IMMUTABLE_CACHE_CONTROL),
        ))
    } else {
        router.fallback_service(spa)
    };

    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            http::request_tracing::request_tracing_middleware,
        ))
        .with_state(state)
}
