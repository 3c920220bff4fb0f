//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compile the route table into an Axum Router
//! - Wire up shared layers (request ID, tracing, timeout, panic recovery)
//! - Answer 404 for unknown paths and for unregistered methods alike
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::{self, AppState};
use crate::config::ServiceConfig;
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::http::response::{handler_panicked, route_not_found};
use crate::routing::RoutingError;
use crate::security::auth::ApiKeyAuth;
use crate::store::{FixedUserStore, UserStore};

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid API key header: {0}")]
    AuthHeader(#[from] axum::http::header::InvalidHeaderName),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server backed by the fixed in-memory user store.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        Self::with_store(config, Arc::new(FixedUserStore))
    }

    /// Create a server backed by the given user store.
    pub fn with_store(
        config: ServiceConfig,
        store: Arc<dyn UserStore>,
    ) -> Result<Self, ServerError> {
        let auth = ApiKeyAuth::from_config(&config.auth)?;
        let routes = api::route_table(auth).into_router(AppState::new(store))?;
        let router = Self::build_router(&config, routes);
        Ok(Self { router, config })
    }

    /// Add the fallbacks and the layers shared by every route.
    ///
    /// A route is a (method, path) pair, so a known path with an
    /// unregistered method is not found rather than 405.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, routes: Router) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id_of(request),
            )
        });

        routes
            .method_not_allowed_fallback(route_not_found)
            .fallback(route_not_found)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(trace)
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(CatchPanicLayer::custom(handler_panicked)),
            )
    }

    /// Run the server until a shutdown signal is received.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for serving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
