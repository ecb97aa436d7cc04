use std::time::Instant;

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::{FromRequest, Request},
    http::{header::CONTENT_LENGTH, Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::app::errors;

/// One log line per request: method, URI, status, response length, latency.
///
/// `POST` bodies are buffered (under axum's default body limit) and included
/// in the line.
pub async fn request_log(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let (req, logged_body) = if method == Method::POST {
        let (parts, body) = req.into_parts();
        let bytes = match Bytes::from_request(Request::new(body), &()).await {
            Ok(b) => b,
            Err(rejection) => {
                let status = rejection.status();
                tracing::warn!(%method, %uri, status = status.as_u16(), error = %rejection, "failed to read request body");
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "payload_too_large"
                } else {
                    "invalid_body"
                };
                return errors::json_error(status, code, rejection.body_text());
            }
        };
        let logged = String::from_utf8_lossy(&bytes).into_owned();
        (Request::from_parts(parts, Body::from(bytes)), Some(logged))
    } else {
        (req, None)
    };

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let content_length = response_length(&response);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    match logged_body {
        Some(body) => tracing::info!(
            %method,
            %uri,
            status,
            content_length = %content_length,
            elapsed_ms,
            body = %body,
            "request"
        ),
        None => tracing::info!(%method, %uri, status, content_length = %content_length, elapsed_ms, "request"),
    }

    response
}

/// Response body length as logged: the exact body size when known, else the
/// `Content-Length` header, else `-`.
fn response_length(response: &Response) -> String {
    if let Some(len) = response.body().size_hint().exact() {
        return len.to_string();
    }
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
