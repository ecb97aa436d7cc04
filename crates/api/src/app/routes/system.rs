use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn index() -> Html<&'static str> {
    Html("<h1>Hello World!</h1>")
}

/// Live entry count plus the current server time.
pub async fn info(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.phonebook.count().await {
        Ok(count) => Html(dto::info_page(count, Utc::now())).into_response(),
        Err(e) => errors::phonebook_error_to_response(e),
    }
}

pub async fn unknown_endpoint() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "unknown_endpoint", "unknown endpoint")
}
