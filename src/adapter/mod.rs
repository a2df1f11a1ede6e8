//! Boundary adapter.
//!
//! # Responsibilities
//! - Run the wrapped handler and pass a successful body through untouched
//! - Turn a signaled [`Outcome`] into status line, headers and body
//! - Turn any other failure, including a panic, into a 500 carrying its trace
//! - Report every unexpected failure to the host error stream and to the
//!   injected [`DiagnosticSink`]
//!
//! # Data Flow
//! ```text
//! OutcomeAdapter::respond(environ, start)
//!     → handler.call(environ, start)
//!         Ok(body)            → body
//!         Err(Outcome)        → start(outcome status, outcome headers) → outcome body
//!         Err(Failure)/panic  → errors stream + sink
//!                             → start("500 Internal Server Error", text/plain, diagnostic)
//!                             → diagnostic text
//! ```

pub mod diagnostic;
pub mod sink;

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bytes::Bytes;

use crate::config::AdapterConfig;
use crate::error::{HandlerError, HandlerResult};
use crate::gateway::{Body, Environ, Handler, StartResponse};
use crate::observability::metrics;
use crate::outcome::{Outcome, CONTENT_TYPE, TEXT_PLAIN_UTF8};

pub use diagnostic::{install_panic_hook, Diagnostic, FailureKind, DIAGNOSTIC_MARKER};
pub use sink::{DiagnosticSink, TracingSink};

pub const INTERNAL_SERVER_ERROR: &str = "500 Internal Server Error";

/// Adapter behaviour switches.
#[derive(Debug, Clone, Copy)]
pub struct AdapterOptions {
    /// Send the diagnostic text as the 500 body. When off the body is the
    /// status line; sinks still get the full text.
    pub expose_diagnostics: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            expose_diagnostics: true,
        }
    }
}

impl From<&AdapterConfig> for AdapterOptions {
    fn from(config: &AdapterConfig) -> Self {
        Self {
            expose_diagnostics: config.expose_diagnostics,
        }
    }
}

/// Wraps one handler and renders whatever it signals.
pub struct OutcomeAdapter<H> {
    handler: H,
    sink: Arc<dyn DiagnosticSink>,
    options: AdapterOptions,
}

impl<H: Handler> OutcomeAdapter<H> {
    /// Wrap `handler`, logging failures through `tracing`.
    pub fn new(handler: H) -> Self {
        Self::with_sink(handler, Arc::new(TracingSink))
    }

    /// Wrap `handler` with an explicit logging sink.
    pub fn with_sink(handler: H, sink: Arc<dyn DiagnosticSink>) -> Self {
        diagnostic::install_panic_hook();
        Self {
            handler,
            sink,
            options: AdapterOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AdapterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> AdapterOptions {
        self.options
    }

    /// Run the handler and always produce a body.
    pub fn respond(&self, environ: &mut Environ, start: &mut dyn StartResponse) -> Body {
        let span = tracing::debug_span!(
            "outcome_adapter",
            request_id = %environ.request_id,
            method = %environ.method,
            path = %environ.path,
        );
        let _enter = span.enter();

        diagnostic::clear_panic_site();
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.handler.call(environ, start)));

        match result {
            Ok(Ok(body)) => body,
            Ok(Err(HandlerError::Outcome(outcome))) => self.emit_outcome(outcome, start),
            Ok(Err(HandlerError::Failure(err))) => {
                self.emit_failure(Diagnostic::from_error(&err), environ, start)
            }
            Err(payload) => self.emit_failure(Diagnostic::from_panic(payload), environ, start),
        }
    }

    fn emit_outcome(&self, outcome: Outcome, start: &mut dyn StartResponse) -> Body {
        tracing::debug!(status = outcome.code(), "Handler signaled outcome");
        metrics::record_response(outcome.code());

        start.start(&outcome.status_line(), outcome.headers(), None);
        outcome.body()
    }

    fn emit_failure(
        &self,
        diagnostic: Diagnostic,
        environ: &mut Environ,
        start: &mut dyn StartResponse,
    ) -> Body {
        metrics::record_failure(diagnostic.kind().as_str());
        metrics::record_response(500);

        let errors = environ.errors();
        if let Err(e) = writeln!(errors, "{}", diagnostic.text()).and_then(|_| errors.flush()) {
            tracing::error!(error = %e, "Failed to write diagnostic to host error stream");
        }
        self.sink.record(&diagnostic);

        start.start(
            INTERNAL_SERVER_ERROR,
            vec![(CONTENT_TYPE.to_string(), TEXT_PLAIN_UTF8.to_string())],
            Some(&diagnostic),
        );

        let text = if self.options.expose_diagnostics {
            diagnostic.text().to_string()
        } else {
            INTERNAL_SERVER_ERROR.to_string()
        };
        vec![Bytes::from(text)]
    }
}

impl<H: Handler> Handler for OutcomeAdapter<H> {
    fn call(&self, environ: &mut Environ, start: &mut dyn StartResponse) -> HandlerResult<Body> {
        Ok(self.respond(environ, start))
    }
}
