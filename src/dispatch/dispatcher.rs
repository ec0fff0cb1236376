//! The dispatch engine.
//!
//! # Responsibilities
//! - Own the route table, the global middleware list and the resolution cache
//! - Resolve each request path (cache first, then the matcher)
//! - Run pre-middleware, the resource, then post-middleware
//! - Contain every failure and produce exactly one response per request

use axum::body::{Body, Bytes};
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::sync::Arc;
use std::time::Instant;

use crate::config::schema::{DispatchConfig, DEFAULT_MAX_BODY_BYTES};
use crate::dispatch::guard::guarded;
use crate::error::DispatchError;
use crate::http::context::Context;
use crate::http::middleware::{Flow, Middleware};
use crate::http::resource::Resource;
use crate::observability::metrics;
use crate::routing::pattern::normalize;
use crate::routing::{match_route, Match, ResolutionCache, RouteGroup};

/// Routes requests to resources through the middleware chain.
///
/// Built with `&mut self` registration calls, then shared (typically in an
/// `Arc`) while serving. Only the resolution cache changes after that.
pub struct Dispatcher {
    routes: RouteGroup,
    middleware: Vec<Arc<dyn Middleware>>,
    cache: ResolutionCache,
    use_cache: bool,
    max_body_bytes: usize,
    not_found: Option<Arc<dyn Resource>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// An empty dispatcher with the cache enabled.
    pub fn new() -> Self {
        Self {
            routes: RouteGroup::new(""),
            middleware: Vec::new(),
            cache: ResolutionCache::new(),
            use_cache: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            not_found: None,
        }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.use_cache = config.use_cache;
        dispatcher.max_body_bytes = config.max_body_bytes;
        dispatcher
    }

    /// Bind `pattern` to `resource` at the top level.
    ///
    /// Duplicate patterns are accepted; the first registered wins.
    ///
    /// # Panics
    /// If the pattern is malformed.
    pub fn add(&mut self, pattern: &str, resource: impl Resource) -> &mut Self {
        self.routes.add(pattern, resource);
        self
    }

    /// Bind `pattern` to a resource shared with other routes.
    pub fn add_shared(&mut self, pattern: &str, resource: Arc<dyn Resource>) -> &mut Self {
        self.routes.add_shared(pattern, resource);
        self
    }

    /// Mount a route group as one routable entry.
    pub fn add_group(&mut self, group: RouteGroup) -> &mut Self {
        self.routes.add_group(group);
        self
    }

    /// Append global middleware; insertion order is pre-phase order.
    pub fn insert(&mut self, middleware: impl Middleware) -> &mut Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Replace the default 404 body with a resource of your own.
    pub fn set_not_found(&mut self, resource: impl Resource) -> &mut Self {
        self.not_found = Some(Arc::new(resource));
        self
    }

    pub fn set_use_cache(&mut self, enabled: bool) -> &mut Self {
        self.use_cache = enabled;
        self
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    pub fn set_max_body_bytes(&mut self, limit: usize) -> &mut Self {
        self.max_body_bytes = limit;
        self
    }

    /// The top-level route table.
    pub fn routes(&self) -> &RouteGroup {
        &self.routes
    }

    /// Number of global middleware.
    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Resolve `path`, consulting and populating the cache when enabled.
    pub fn resolve(&self, path: &str) -> Option<Arc<Match>> {
        let path = normalize(path);
        if self.use_cache {
            if let Some(hit) = self.cache.get(path) {
                return Some(hit);
            }
        }

        let found = Arc::new(match_route(&self.routes, path)?);
        if self.use_cache {
            self.cache.put(path, Arc::clone(&found));
        }
        Some(found)
    }

    /// Handle one request. Never fails: every error becomes a response.
    pub async fn dispatch(&self, request: Request<Body>) -> Response<Body> {
        let started = Instant::now();
        let (parts, body) = request.into_parts();
        let method = parts.method.clone();

        let (body, body_error) = self.read_body(&parts.headers, body).await;
        let mut ctx = Context::new(parts, body);

        let target = match body_error {
            Some(err) => Err(err),
            None => self.resolve(ctx.path()).ok_or_else(|| DispatchError::NotFound {
                path: ctx.path().to_string(),
            }),
        };

        let route_label = match &target {
            Ok(found) => {
                ctx.set_params(found.params().clone());
                found.route().pattern().as_str().to_string()
            }
            Err(_) => "none".to_string(),
        };

        let group_chain: &[Arc<dyn Middleware>] = match &target {
            Ok(found) => found.middleware(),
            Err(_) => &[],
        };
        let chain: Vec<&Arc<dyn Middleware>> =
            self.middleware.iter().chain(group_chain.iter()).collect();

        tracing::debug!(
            method = %method,
            path = %ctx.path(),
            route = %route_label,
            middleware = chain.len(),
            "Dispatching request"
        );

        // Pre phase, insertion order.
        let mut entered = 0;
        let mut proceed = true;
        for middleware in &chain {
            entered += 1;
            match guarded(middleware.before(&mut ctx)).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => {
                    tracing::debug!(middleware = middleware.name(), "Middleware stopped the chain");
                    proceed = false;
                    break;
                }
                Err(err) => {
                    fail(&mut ctx, &err, middleware.name());
                    proceed = false;
                    break;
                }
            }
        }

        if proceed {
            self.invoke(&mut ctx, &target).await;
        }

        // Post phase, reverse order, over everything that was entered.
        for middleware in chain[..entered].iter().rev() {
            if let Err(err) = guarded(middleware.after(&mut ctx)).await {
                fail(&mut ctx, &err, middleware.name());
            }
        }

        let reply = ctx.into_reply();
        metrics::record_request(method.as_str(), reply.status().as_u16(), &route_label, started);
        reply.into_response()
    }

    async fn invoke(&self, ctx: &mut Context, target: &Result<Arc<Match>, DispatchError>) {
        match target {
            Ok(found) => {
                let source = found.route().pattern().as_str();
                run_resource(ctx, found.route().resource().as_ref(), |ctx, err| {
                    fail(ctx, err, source)
                })
                .await;
            }
            Err(err @ DispatchError::NotFound { .. }) => {
                tracing::warn!(path = %ctx.path(), "No route matched");
                match &self.not_found {
                    Some(resource) => {
                        ctx.set_status(StatusCode::NOT_FOUND);
                        run_resource(ctx, resource.as_ref(), |ctx, handler_err| {
                            tracing::debug!(error = %handler_err, "Not-found resource failed");
                            ctx.write_error(err);
                        })
                        .await;
                    }
                    None => ctx.write_error(err),
                }
            }
            Err(err) => fail(ctx, err, "request"),
        }
    }

    /// Buffer the body, enforcing the configured limit.
    async fn read_body(
        &self,
        headers: &axum::http::HeaderMap,
        body: Body,
    ) -> (Bytes, Option<DispatchError>) {
        let too_large = DispatchError::PayloadTooLarge {
            limit: self.max_body_bytes,
        };

        let declared = headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if declared.is_some_and(|len| len > self.max_body_bytes) {
            return (Bytes::new(), Some(too_large));
        }

        match Limited::new(body, self.max_body_bytes).collect().await {
            Ok(collected) => (collected.to_bytes(), None),
            Err(e) if e.is::<LengthLimitError>() => (Bytes::new(), Some(too_large)),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read request body");
                (
                    Bytes::new(),
                    Some(DispatchError::status(
                        StatusCode::BAD_REQUEST,
                        "Failed to read request body",
                    )),
                )
            }
        }
    }
}

/// Run `resource` inside its lifecycle hooks.
///
/// Failures go to `on_error` as they happen, so `after` observes the
/// response the client will get.
async fn run_resource<F>(ctx: &mut Context, resource: &dyn Resource, on_error: F)
where
    F: Fn(&mut Context, &DispatchError),
{
    match guarded(resource.before(ctx)).await {
        Ok(()) => {
            if let Err(err) = guarded(resource.handle(ctx)).await {
                on_error(ctx, &err);
            }
        }
        Err(err) => on_error(ctx, &err),
    }
    if let Err(err) = guarded(resource.after(ctx)).await {
        on_error(ctx, &err);
    }
}

/// Record a failure on the response and in the logs.
fn fail(ctx: &mut Context, err: &DispatchError, source: &str) {
    match err {
        DispatchError::Panicked { message } => {
            metrics::record_panic();
            tracing::error!(
                source,
                path = %ctx.path(),
                panic = %message,
                "Recovered from panic during dispatch"
            );
        }
        DispatchError::Internal(_) => {
            tracing::error!(source, path = %ctx.path(), error = %err, "Dispatch failed");
        }
        _ => {
            tracing::debug!(source, path = %ctx.path(), error = %err, "Request rejected");
        }
    }
    ctx.write_error(err);
}
