//! Diagnostic text for unexpected failures.
//!
//! Backtraces are always captured here, whatever `RUST_BACKTRACE` says. For
//! panics a chaining hook records the location and stack at the panic site
//! on the panicking thread; [`Diagnostic::from_panic`] picks them up after
//! the unwind was caught.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::fmt::{self, Write};
use std::panic;
use std::sync::Once;

/// First line of every diagnostic text.
pub const DIAGNOSTIC_MARKER: &str = "Unhandled failure:";

/// How the handler failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The handler returned an unexpected error.
    Error,
    /// The handler panicked.
    Panic,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Error => "error",
            FailureKind::Panic => "panic",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a panic happened, recorded by the hook.
struct PanicSite {
    location: Option<String>,
    backtrace: Backtrace,
}

thread_local! {
    static PANIC_SITE: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Install the panic-site hook once per process. The previous hook still runs.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let site = PanicSite {
                location: info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
                backtrace: Backtrace::force_capture(),
            };
            let _ = PANIC_SITE.try_with(|cell| {
                if let Ok(mut slot) = cell.try_borrow_mut() {
                    *slot = Some(site);
                }
            });
            previous(info);
        }));
    });
}

/// Forget any panic site recorded earlier on this thread.
pub(crate) fn clear_panic_site() {
    take_panic_site();
}

fn take_panic_site() -> Option<PanicSite> {
    PANIC_SITE
        .try_with(|cell| cell.try_borrow_mut().ok().and_then(|mut slot| slot.take()))
        .ok()
        .flatten()
}

/// Captured trace of an unexpected failure.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    kind: FailureKind,
    message: String,
    location: Option<String>,
    text: String,
}

impl Diagnostic {
    /// Capture an error with its cause chain, root cause type and backtrace.
    ///
    /// Uses the error's own backtrace when one was captured at creation,
    /// otherwise takes one now.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let message = err.to_string();

        let mut details = Vec::new();
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        if !causes.is_empty() {
            details.push("Caused by:".to_string());
            for (i, cause) in causes.iter().enumerate() {
                details.push(format!("    {i}: {cause}"));
            }
        }
        details.push(format!("Root cause: {:?}", err.root_cause()));

        let text = if err.backtrace().status() == BacktraceStatus::Captured {
            render(FailureKind::Error, &message, &details, err.backtrace())
        } else {
            render(FailureKind::Error, &message, &details, &Backtrace::force_capture())
        };

        Self {
            kind: FailureKind::Error,
            message,
            location: None,
            text,
        }
    }

    /// Capture a panic payload, with the site recorded by
    /// [`install_panic_hook`] when available.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        let site = take_panic_site();
        let location = site.as_ref().and_then(|s| s.location.clone());
        let mut details = Vec::new();
        if let Some(location) = &location {
            details.push(format!("Panicked at {location}"));
        }

        let text = match &site {
            Some(site) => render(FailureKind::Panic, &message, &details, &site.backtrace),
            None => render(FailureKind::Panic, &message, &details, &Backtrace::force_capture()),
        };

        Self {
            kind: FailureKind::Panic,
            message,
            location,
            text,
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `file:line:column` of the panic, for panics caught after the hook
    /// was installed.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Full diagnostic text, starting with [`DIAGNOSTIC_MARKER`].
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn render(kind: FailureKind, message: &str, details: &[String], backtrace: &Backtrace) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "{DIAGNOSTIC_MARKER} {kind}: {message}");
    for line in details {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "Stack backtrace:");
    let _ = writeln!(out, "{backtrace}");
    out
}
