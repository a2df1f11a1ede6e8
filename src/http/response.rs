//! Response handling and transformation.
//!
//! # Responsibilities
//! - Record the single start-response call a gateway handler makes
//! - Turn the recorded status line, headers and body chunks into an axum response
//!
//! # Design Decisions
//! - A handler that never starts a response gets a 500
//! - Header names or values HTTP cannot carry are dropped with a warning

use axum::{
    body::Body as HttpBody,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::adapter::Diagnostic;
use crate::gateway::{Body, Headers, StartResponse};

/// Captures what a handler passes to start-response.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<String>,
    headers: Headers,
    failed: bool,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status line of the started response, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// True when the response reports an unexpected failure.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Build the HTTP response from the recorded start and the returned body.
    pub fn into_response(self, body: Body) -> Response {
        let Some(status_line) = self.status else {
            tracing::error!("Handler returned without starting a response");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Handler did not start a response",
            )
                .into_response();
        };

        let Some(status) = parse_status(&status_line) else {
            tracing::error!(
                status = %status_line,
                "Handler started response with invalid status line"
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid status line").into_response();
        };

        let mut response = Response::new(HttpBody::from(body.concat()));
        *response.status_mut() = status;

        let header_map = response.headers_mut();
        for (name, value) in self.headers {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
                (Ok(name), Ok(value)) => {
                    header_map.append(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping unrepresentable header"),
            }
        }

        response
    }
}

impl StartResponse for ResponseRecorder {
    fn start(&mut self, status: &str, headers: Headers, context: Option<&Diagnostic>) {
        if let Some(previous) = &self.status {
            tracing::warn!(
                previous = %previous,
                status = %status,
                "Response started twice; keeping the last"
            );
        }
        self.status = Some(status.to_string());
        self.headers = headers;
        self.failed = context.is_some();
    }
}

/// Status code from a `"<code> <reason>"` line.
fn parse_status(line: &str) -> Option<StatusCode> {
    let code = line.split_whitespace().next()?;
    code.parse::<u16>().ok().and_then(|c| StatusCode::from_u16(c).ok())
}
