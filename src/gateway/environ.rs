//! Request-scoped context handed to every handler.

use std::fmt;
use std::io::{self, Write};

use bytes::Bytes;
use uuid::Uuid;

/// Host error-output stream.
pub type ErrorStream = Box<dyn Write + Send>;

/// The request as the host presents it, plus the host's error stream.
pub struct Environ {
    pub request_id: Uuid,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Request headers in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    errors: ErrorStream,
}

impl Environ {
    /// A `GET /` request writing diagnostics to stderr.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            method: "GET".to_string(),
            path: "/".to_string(),
            query: None,
            headers: Vec::new(),
            body: Bytes::new(),
            errors: Box::new(io::stderr()),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Replace the host error stream.
    pub fn with_errors(mut self, errors: impl Write + Send + 'static) -> Self {
        self.errors = Box::new(errors);
        self
    }

    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The host error-output stream.
    pub fn errors(&mut self) -> &mut (dyn Write + Send) {
        self.errors.as_mut()
    }
}

impl Default for Environ {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environ")
            .field("request_id", &self.request_id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish_non_exhaustive()
    }
}
