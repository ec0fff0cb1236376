//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router that forwards every request to the Dispatcher
//! - Wire up transport middleware (tracing, request timeout)
//! - Bind server to listener and serve until shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RouterConfig;
use crate::dispatch::Dispatcher;

/// HTTP front end for a [`Dispatcher`].
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
    dispatcher: Arc<Dispatcher>,
}

impl HttpServer {
    /// Freeze `dispatcher` and build the server around it.
    pub fn new(config: RouterConfig, dispatcher: Dispatcher) -> Self {
        let dispatcher = Arc::new(dispatcher);
        let router = Self::build_router(&config, Arc::clone(&dispatcher));
        Self {
            router,
            config,
            dispatcher,
        }
    }

    /// Build the Axum router with all transport layers.
    #[allow(deprecated)]
    pub fn build_router(config: &RouterConfig, dispatcher: Arc<Dispatcher>) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(dispatcher)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight
    /// requests. Pass [`Shutdown::wait`](crate::lifecycle::Shutdown::wait).
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.dispatcher.routes().effective_patterns().len(),
            use_cache = self.dispatcher.use_cache(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!(
            cached_paths = self.dispatcher.cache().len(),
            "HTTP server stopped"
        );
        Ok(())
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }
}

async fn dispatch_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    request: Request<Body>,
) -> Response {
    dispatcher.dispatch(request).await
}
