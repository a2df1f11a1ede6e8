//! Synchronous gateway contract between a host server and application code.
//!
//! # Data Flow
//! ```text
//! host builds Environ
//!     → Handler::call(environ, start_response)
//!     → handler calls StartResponse::start(status, headers, context) once
//!     → handler returns Body (byte chunks)
//!     → host writes status, headers, body to the wire
//! ```
//!
//! # Design Decisions
//! - Headers are ordered `(name, value)` string pairs, names keep their case
//! - A handler either returns a body or an explicit
//!   [`HandlerError`](crate::error::HandlerError)
//! - No async here; hosts run handlers on a blocking thread

pub mod environ;

use std::sync::Arc;

use bytes::Bytes;

use crate::adapter::Diagnostic;
use crate::error::HandlerResult;

pub use environ::{Environ, ErrorStream};

/// Ordered response headers.
pub type Headers = Vec<(String, String)>;

/// Response body chunks.
pub type Body = Vec<Bytes>;

/// Host callback that begins a response.
pub trait StartResponse {
    /// Begin the response. `context` is set when the response reports an
    /// unexpected failure.
    fn start(&mut self, status: &str, headers: Headers, context: Option<&Diagnostic>);
}

impl<F> StartResponse for F
where
    F: FnMut(&str, Headers, Option<&Diagnostic>),
{
    fn start(&mut self, status: &str, headers: Headers, context: Option<&Diagnostic>) {
        self(status, headers, context)
    }
}

/// Request-handling callable.
pub trait Handler: Send + Sync {
    fn call(&self, environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body>;
}

/// Handler built from a function, see [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap a function or closure as a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut Environ, &mut dyn StartResponse) -> HandlerResult<Body> + Send + Sync,
{
    HandlerFn { f }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut Environ, &mut dyn StartResponse) -> HandlerResult<Body> + Send + Sync,
{
    fn call(&self, environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body> {
        (self.f)(environ, start)
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn call(&self, environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body> {
        (**self).call(environ, start)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn call(&self, environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body> {
        (**self).call(environ, start)
    }
}

/// Single-chunk body from text.
pub fn text_body(text: impl Into<String>) -> Body {
    vec![Bytes::from(text.into())]
}
