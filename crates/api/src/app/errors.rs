use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use phonebook_core::PhonebookError;

pub fn phonebook_error_to_response(err: PhonebookError) -> axum::response::Response {
    match &err {
        PhonebookError::Validation(_) => json_error(StatusCode::BAD_REQUEST, err.code(), err.to_string()),
        PhonebookError::MalformedIdentifier(_) => {
            json_error(StatusCode::BAD_REQUEST, err.code(), "malformed id")
        }
        PhonebookError::NotFound => json_error(StatusCode::NOT_FOUND, err.code(), "entry not found"),
        PhonebookError::DuplicateConflict(_) => json_error(StatusCode::CONFLICT, err.code(), err.to_string()),
        PhonebookError::StoreUnavailable(msg) => {
            tracing::error!(error = %msg, "store unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, err.code(), "store unavailable")
        }
    }
}

pub fn body_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn not_found() -> axum::response::Response {
    phonebook_error_to_response(PhonebookError::not_found())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
