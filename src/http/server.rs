//! HTTP server hosting a gateway handler.
//!
//! # Responsibilities
//! - Create Axum Router that sends every request to the adapter
//! - Wire up middleware (tracing, timeout)
//! - Run the synchronous adapter on the blocking pool
//! - Serve with graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::adapter::OutcomeAdapter;
use crate::config::ServerConfig;
use crate::gateway::{Body as GatewayBody, Environ, Handler, StartResponse};
use crate::http::request::into_environ;
use crate::http::response::ResponseRecorder;

type Respond = dyn Fn(&mut Environ, &mut dyn StartResponse) -> GatewayBody + Send + Sync;

/// State injected into the fallback handler.
#[derive(Clone)]
struct HostState {
    respond: Arc<Respond>,
    max_body_bytes: usize,
}

/// HTTP server that runs every request through an [`OutcomeAdapter`].
pub struct GatewayHost {
    router: Router,
    config: ServerConfig,
}

impl GatewayHost {
    /// Create a host for `adapter` with the given server settings.
    pub fn new<H>(adapter: OutcomeAdapter<H>, config: ServerConfig) -> Self
    where
        H: Handler + 'static,
    {
        let adapter = Arc::new(adapter);
        let state = HostState {
            respond: Arc::new(move |environ: &mut Environ, start: &mut dyn StartResponse| {
                adapter.respond(environ, start)
            }),
            max_body_bytes: config.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: HostState) -> Router {
        Router::new()
            .fallback(gateway_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for embedding or for driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Serve until `signal` resolves.
    pub async fn run_until<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Runs the adapter for one request.
async fn gateway_handler(State(state): State<HostState>, request: Request<Body>) -> Response {
    let mut environ = match into_environ(request, state.max_body_bytes).await {
        Ok(environ) => environ,
        Err(response) => return response,
    };
    let request_id = environ.request_id;

    let respond = state.respond.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let mut recorder = ResponseRecorder::new();
        let body = respond(&mut environ, &mut recorder);
        (recorder, body)
    })
    .await;

    match joined {
        Ok((recorder, body)) => {
            tracing::debug!(
                request_id = %request_id,
                status = recorder.status().unwrap_or("-"),
                failed = recorder.failed(),
                "Request handled"
            );
            recorder.into_response(body)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Handler task did not complete");
            (StatusCode::INTERNAL_SERVER_ERROR, "Handler task did not complete").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
