//! Request handling and transformation.
//!
//! # Responsibilities
//! - Reuse the caller's `X-Request-ID` when it is a UUID, otherwise mint one
//! - Buffer the body up to the configured limit
//! - Copy method, path, query and headers into an [`Environ`]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::gateway::Environ;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Collect an axum request into a gateway [`Environ`].
///
/// Fails with a ready-made 413 response when the body is over `max_body_bytes`
/// or cannot be read.
pub async fn into_environ(
    request: Request<Body>,
    max_body_bytes: usize,
) -> Result<Environ, Response> {
    let (parts, body) = request.into_parts();

    let request_id = parts
        .headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4);

    let body = match axum::body::to_bytes(body, max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejecting request body");
            return Err((StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response());
        }
    };

    let mut environ = Environ::new()
        .with_method(parts.method.as_str())
        .with_path(parts.uri.path())
        .with_body(body);
    environ.request_id = request_id;
    environ.query = parts.uri.query().map(str::to_string);
    environ.headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    Ok(environ)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_fields_are_copied() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .method("POST")
            .uri("/bags/common/tiddlers?sort=title")
            .header(X_REQUEST_ID, id.to_string())
            .header("Content-Type", "text/plain")
            .body(Body::from("hello"))
            .unwrap();

        let environ = into_environ(request, 1024).await.unwrap();
        assert_eq!(environ.request_id, id);
        assert_eq!(environ.method, "POST");
        assert_eq!(environ.path, "/bags/common/tiddlers");
        assert_eq!(environ.query.as_deref(), Some("sort=title"));
        assert_eq!(environ.header("content-type"), Some("text/plain"));
        assert_eq!(&environ.body[..], b"hello");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let request = Request::builder()
            .uri("/")
            .body(Body::from(vec![b'x'; 64]))
            .unwrap();

        let response = into_environ(request, 16).await.unwrap_err();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
