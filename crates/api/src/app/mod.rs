//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: backend selection and the shared `Phonebook` service
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and response helpers
//! - `errors.rs`: consistent error responses

use std::path::Path;
use std::sync::Arc;

use axum::{handler::HandlerWithoutStateExt, routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir};

use phonebook_infra::PhonebookConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &PhonebookConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(config).await?);
    Ok(router(services, &config.static_dir))
}

/// Assemble the router around already-built services.
///
/// Paths that match no route are looked up in `static_dir`; anything still
/// unmatched, whatever the method, gets a JSON 404.
pub fn router(services: Arc<services::AppServices>, static_dir: &Path) -> Router {
    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(routes::system::unknown_endpoint.into_service());

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(static_dir))
        .method_not_allowed_fallback(routes::system::unknown_endpoint)
        .fallback_service(static_files)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_log))
                .layer(CorsLayer::permissive()),
        )
}
