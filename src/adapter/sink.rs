//! Logging sink for unexpected failures.

use super::Diagnostic;

/// Receives the diagnostic of every unexpected failure.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: &Diagnostic);
}

/// Emits diagnostics as warning-level `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        tracing::warn!(kind = %diagnostic.kind(), "{}", diagnostic.text());
    }
}
