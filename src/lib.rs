//! Typed HTTP outcomes and the boundary adapter that renders them.
//!
//! Application code signals a non-success response by returning an
//! [`Outcome`] instead of building the response by hand. An
//! [`OutcomeAdapter`] wraps the handler and turns whatever it signals into a
//! status line, headers and body. Anything unexpected, panics included,
//! becomes a `500 Internal Server Error` carrying the failure trace.
//!
//! ```
//! use outcome_layer::{handler_fn, Diagnostic, Environ, Headers, Outcome, OutcomeAdapter};
//!
//! let app = OutcomeAdapter::new(handler_fn(|_environ, _start| {
//!     Err(Outcome::not_found("resource unavailable").into())
//! }));
//!
//! let mut status = String::new();
//! let mut start = |s: &str, _: Headers, _: Option<&Diagnostic>| status = s.to_string();
//! let body = app.respond(&mut Environ::new(), &mut start);
//! assert_eq!(status, "404 Not Found");
//! assert_eq!(&body[0][..], b"404 Not Found: resource unavailable");
//! ```

// Core
pub mod adapter;
pub mod error;
pub mod gateway;
pub mod outcome;

// Hosting
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use adapter::{Diagnostic, DiagnosticSink, OutcomeAdapter, TracingSink};
pub use config::AppConfig;
pub use error::{HandlerError, HandlerResult};
pub use gateway::{handler_fn, Body, Environ, Handler, Headers, StartResponse};
pub use http::GatewayHost;
pub use outcome::{CacheHeaders, Message, Outcome};
