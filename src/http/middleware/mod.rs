//! Middleware: cross-cutting logic wrapped around every dispatch.
//!
//! # Data Flow
//! ```text
//! before:  global[0] → global[1] → group[0] → ... → resource
//! after:   resource → ... → group[0] → global[1] → global[0]
//! ```
//!
//! # Design Decisions
//! - One insertion-ordered list; the post phase walks it in reverse
//! - A middleware returning `Flow::Stop` ends the pre phase and skips the
//!   resource; the post phase still runs for everything already entered
//! - Global middleware runs even when no route matches

pub mod access_log;
pub mod auth;
pub mod request_id;
pub mod security_headers;

use async_trait::async_trait;

use crate::error::DispatchError;
use crate::http::context::Context;

pub use access_log::AccessLog;
pub use auth::{AuthenticatedToken, BearerAuth};
pub use request_id::{RequestId, RequestIdMiddleware, X_REQUEST_ID};
pub use security_headers::SecurityHeaders;

/// Verdict of a pre-phase middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Hand the request to the next middleware (or the resource).
    Continue,
    /// Stop here; the response written so far is final.
    Stop,
}

/// Cross-cutting pre/post request logic.
#[async_trait]
pub trait Middleware: Send + Sync + 'static {
    /// Runs before the resource, in insertion order.
    async fn before(&self, _ctx: &mut Context) -> Result<Flow, DispatchError> {
        Ok(Flow::Continue)
    }

    /// Runs after the resource, in reverse insertion order.
    async fn after(&self, _ctx: &mut Context) -> Result<(), DispatchError> {
        Ok(())
    }

    /// Name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
