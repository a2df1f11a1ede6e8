//! Rendering an outcome directly as an axum response.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};

use super::Outcome;

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body_text()));
        *response.status_mut() = self.status();

        let headers = response.headers_mut();
        for (name, value) in self.headers() {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => {
                    tracing::warn!(
                        header = %name,
                        status = self.code(),
                        "Dropping unrepresentable header"
                    );
                }
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::CacheHeaders;
    use axum::http::{header, StatusCode};

    #[tokio::test]
    async fn test_into_response_renders_text_outcome() {
        let response = Outcome::precondition_failed("etag mismatch").into_response();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=UTF-8"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"412 Precondition Failed: etag mismatch");
    }

    #[test]
    fn test_into_response_carries_validators() {
        let cache = CacheHeaders::new().etag("\"v1\"").cache_control("max-age=60");
        let response = Outcome::not_modified(cache).into_response();
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(response.headers().len(), 2);
        assert_eq!(response.headers().get(header::ETAG).unwrap(), "\"v1\"");
    }

    #[test]
    fn test_control_characters_drop_header() {
        let response = Outcome::found("http://example.org/\r\nSet-Cookie: x=1").into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(response.headers().get(header::LOCATION).is_none());
    }
}
