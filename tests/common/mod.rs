//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use outcome_layer::{
    Body, Diagnostic, DiagnosticSink, Environ, Handler, Headers, OutcomeAdapter, StartResponse,
};

/// What a handler passed to start-response.
#[derive(Debug, Default)]
pub struct RecordedStart {
    pub calls: Vec<(String, Headers, Option<String>)>,
}

impl RecordedStart {
    pub fn status(&self) -> &str {
        &self.calls[0].0
    }

    pub fn headers(&self) -> &Headers {
        &self.calls[0].1
    }

    /// Header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl StartResponse for RecordedStart {
    fn start(&mut self, status: &str, headers: Headers, context: Option<&Diagnostic>) {
        self.calls.push((
            status.to_string(),
            headers,
            context.map(|d| d.text().to_string()),
        ));
    }
}

/// Cloneable in-memory error stream.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Logging sink that keeps every diagnostic.
#[derive(Debug, Default)]
pub struct RecordingSink(Mutex<Vec<String>>);

impl RecordingSink {
    pub fn records(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        self.0.lock().unwrap().push(diagnostic.text().to_string());
    }
}

/// Result of one adapter invocation.
pub struct Exchange {
    pub start: RecordedStart,
    pub body: Body,
    pub errors: SharedBuffer,
    pub sink: Arc<RecordingSink>,
}

impl Exchange {
    pub fn body_text(&self) -> String {
        let bytes: Vec<u8> = self.body.concat();
        String::from_utf8(bytes).unwrap()
    }
}

/// Wrap `handler` in an adapter with recording sinks and run one request.
pub fn exchange<H: Handler>(handler: H, environ: Environ) -> Exchange {
    let sink = Arc::new(RecordingSink::default());
    let errors = SharedBuffer::default();
    let adapter = OutcomeAdapter::with_sink(handler, sink.clone());

    let mut environ = environ.with_errors(errors.clone());
    let mut start = RecordedStart::default();
    let body = adapter.respond(&mut environ, &mut start);

    Exchange {
        start,
        body,
        errors,
        sink,
    }
}
