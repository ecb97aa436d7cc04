use std::path::Path;

use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, get_service},
    Router,
};
use tower_http::services::ServeDir;

pub mod persons;
pub mod system;

/// Router for the phonebook pages and the `/api` surface.
///
/// `/` serves `static_dir/index.html` when a frontend build is present and
/// falls back to the plain landing page otherwise.
pub fn router(static_dir: &Path) -> Router {
    let landing = ServeDir::new(static_dir).fallback(system::index.into_service());

    Router::new()
        .route("/", get_service(landing))
        .route("/info", get(system::info))
        .nest("/api/persons", persons::router())
}
