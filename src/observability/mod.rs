//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! adapter / host produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (response and failure counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID travels as a span field on every adapter event
//! - Metrics are cheap counters; without an installed recorder they are no-ops

pub mod logging;
pub mod metrics;
