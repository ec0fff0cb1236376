//! HTTP request dispatcher library.
//!
//! Maps a request's method and path to a registered [`Resource`], runs the
//! [`Middleware`] chain around it, and memoizes path resolution in a
//! concurrent cache.
//!
//! ```no_run
//! use async_trait::async_trait;
//! use resource_router::{Context, Dispatcher, HandlerResult, Resource, RouteGroup};
//!
//! struct User;
//!
//! #[async_trait]
//! impl Resource for User {
//!     async fn get(&self, ctx: &mut Context) -> HandlerResult {
//!         let id = ctx.param("id").unwrap_or_default().to_string();
//!         ctx.render(format!("user {id}"));
//!         Ok(())
//!     }
//! }
//!
//! let mut api = RouteGroup::new("/api");
//! api.add("/users/:id", User);
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.add_group(api);
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use dispatch::Dispatcher;
pub use error::{DispatchError, HandlerResult};
pub use http::{Context, Flow, HttpServer, Middleware, Reply, Resource};
pub use lifecycle::Shutdown;
pub use routing::{Match, Params, Pattern, PatternError, ResolutionCache, Route, RouteGroup};
