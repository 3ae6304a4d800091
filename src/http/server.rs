//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wire the API router to the shared application state
//! - Layer middleware (request ID, tracing, body limit, timeout, metrics)
//! - Bind the server to a listener and drain it on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::AppConfig;
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::store::Store;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

/// HTTP server for the ride-hailing API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let state = AppState { store };
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// an OS signal or the shutdown coordinator fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layer order, outermost first: request-id tagging, trace span,
/// request-id propagation onto the response, body limit, timeout, then
/// the metrics observation closest to the handler.
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    api::router(state)
        .route_layer(middleware::from_fn(metrics::track_requests))
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn wait_for_shutdown(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = signals::shutdown_signal() => {},
        _ = shutdown.recv() => {},
    }
    tracing::info!("Shutdown signal received");
}
