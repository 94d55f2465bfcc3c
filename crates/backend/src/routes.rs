use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::shared::app_state::AppState;
use crate::shared::config::static_dir;
use crate::system::middleware::request_logger;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let static_files = ServeDir::new(static_dir(&state.config));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/download", get(handlers::download::download))
        // Собранный frontend (trunk build -> dist)
        .fallback_service(static_files)
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
