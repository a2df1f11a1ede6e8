//! HTTP host for gateway handlers.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, timeout)
//!     → request.rs (request ID, buffered body → Environ)
//!     → OutcomeAdapter on the blocking pool
//!     → response.rs (recorded start-response + body → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{into_environ, X_REQUEST_ID};
pub use response::ResponseRecorder;
pub use server::GatewayHost;
