//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → Dispatcher (routing, middleware, resource)
//!         context.rs  (request view + response being built)
//!         resource.rs (per-method handlers)
//!         middleware/ (pre/post hooks)
//!     → response.rs (finalized once)
//!     → Send to client
//! ```

pub mod context;
pub mod middleware;
pub mod resource;
pub mod response;
pub mod server;

pub use context::Context;
pub use middleware::{Flow, Middleware};
pub use resource::Resource;
pub use response::Reply;
pub use server::HttpServer;
