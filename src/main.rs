//! resource-router demo server.
//!
//! Serves a small REST API through the Dispatcher:
//!
//! ```text
//! GET    /health
//! GET    /echo/:message
//! GET    /api/notes/:id        (bearer token when security.api_key is set)
//! PUT    /api/notes/:id
//! DELETE /api/notes/:id
//! ```

use async_trait::async_trait;
use axum::http::StatusCode;
use clap::Parser;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use resource_router::config::{load_config, RouterConfig};
use resource_router::http::middleware::{AccessLog, BearerAuth, RequestIdMiddleware, SecurityHeaders};
use resource_router::lifecycle::signals::spawn_ctrl_c_handler;
use resource_router::observability::{logging, metrics};
use resource_router::{
    Context, DispatchError, Dispatcher, HandlerResult, HttpServer, Resource, RouteGroup, Shutdown,
};

#[derive(Parser)]
#[command(name = "resource-router")]
#[command(about = "HTTP request dispatcher demo server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Disable the resolution cache.
    #[arg(long)]
    no_cache: bool,
}

struct Health;

#[async_trait]
impl Resource for Health {
    async fn get(&self, ctx: &mut Context) -> HandlerResult {
        ctx.render_json(&serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }
}

struct Echo;

#[async_trait]
impl Resource for Echo {
    async fn get(&self, ctx: &mut Context) -> HandlerResult {
        let message = ctx.param("message").unwrap_or_default().to_string();
        ctx.render(message);
        Ok(())
    }
}

#[derive(Default)]
struct Notes {
    store: DashMap<String, String>,
}

impl Notes {
    fn id(ctx: &Context) -> Result<String, DispatchError> {
        ctx.param("id")
            .map(str::to_string)
            .ok_or_else(|| DispatchError::Internal("route is missing :id".into()))
    }
}

#[async_trait]
impl Resource for Notes {
    async fn get(&self, ctx: &mut Context) -> HandlerResult {
        let id = Self::id(ctx)?;
        let note = self
            .store
            .get(&id)
            .map(|n| n.value().clone())
            .ok_or_else(|| DispatchError::status(StatusCode::NOT_FOUND, format!("note {id} not found")))?;
        ctx.render_json(&serde_json::json!({ "id": id, "text": note }))
    }

    async fn put(&self, ctx: &mut Context) -> HandlerResult {
        let id = Self::id(ctx)?;
        let text = String::from_utf8(ctx.body().to_vec())
            .map_err(|_| DispatchError::status(StatusCode::BAD_REQUEST, "note must be UTF-8"))?;
        let created = self.store.insert(id.clone(), text).is_none();
        ctx.set_status(if created { StatusCode::CREATED } else { StatusCode::OK });
        ctx.render_json(&serde_json::json!({ "id": id }))
    }

    async fn delete(&self, ctx: &mut Context) -> HandlerResult {
        let id = Self::id(ctx)?;
        match self.store.remove(&id) {
            Some(_) => {
                ctx.set_status(StatusCode::NO_CONTENT);
                Ok(())
            }
            None => Err(DispatchError::status(StatusCode::NOT_FOUND, format!("note {id} not found"))),
        }
    }
}

fn build_dispatcher(config: &RouterConfig) -> Dispatcher {
    let mut dispatcher = Dispatcher::from_config(&config.dispatch);

    if config.observability.access_log {
        dispatcher.insert(AccessLog);
    }
    dispatcher.insert(RequestIdMiddleware);
    if config.security.security_headers {
        dispatcher.insert(SecurityHeaders);
    }

    dispatcher.add("/health", Health);
    dispatcher.add("/echo/:message", Echo);

    let mut api = RouteGroup::new("/api");
    if let Some(key) = &config.security.api_key {
        api.insert(BearerAuth::new(key.clone()));
    }
    api.add_shared("/notes/:id", Arc::new(Notes::default()));
    dispatcher.add_group(api);

    dispatcher
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if cli.no_cache {
        config.dispatch.use_cache = false;
    }

    logging::init(&config.observability);
    tracing::info!("resource-router v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let dispatcher = build_dispatcher(&config);
    for pattern in dispatcher.routes().effective_patterns() {
        tracing::debug!(pattern = %pattern, "Route registered");
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.wait();
    spawn_ctrl_c_handler(Arc::clone(&shutdown));

    HttpServer::new(config, dispatcher)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
