use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_persons).post(create_person))
        .route("/:id", get(get_person).put(replace_person).delete(delete_person))
}

pub async fn list_persons(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.phonebook.list_all().await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => errors::phonebook_error_to_response(e),
    }
}

pub async fn get_person(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.phonebook.find_by_id(&id).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(entry)).into_response(),
        Ok(None) => errors::not_found(),
        Err(e) => errors::phonebook_error_to_response(e),
    }
}

pub async fn create_person(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::EntryRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    match services.phonebook.insert(body.into()).await {
        Ok(entry) => {
            tracing::info!(entry_id = %entry.id, "entry created");
            (StatusCode::CREATED, Json(entry)).into_response()
        }
        Err(e) => errors::phonebook_error_to_response(e),
    }
}

pub async fn replace_person(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::EntryRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::body_rejection_to_response(rejection),
    };

    match services.phonebook.update_by_id(&id, body.into()).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(entry)).into_response(),
        Ok(None) => errors::not_found(),
        Err(e) => errors::phonebook_error_to_response(e),
    }
}

/// Repeated deletes of the same id keep answering 404.
pub async fn delete_person(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.phonebook.delete_by_id(&id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::not_found(),
        Err(e) => errors::phonebook_error_to_response(e),
    }
}
