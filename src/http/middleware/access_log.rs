//! Access logging.
//!
//! Logs one structured line per request at the end of the post phase.
//! Insert it first so it wraps everything else and sees every request,
//! including 404s, short-circuits and recovered panics.

use async_trait::async_trait;
use std::time::Instant;

use crate::error::DispatchError;
use crate::http::context::Context;
use crate::http::middleware::request_id::RequestId;
use crate::http::middleware::{Flow, Middleware};

#[derive(Debug, Clone, Copy)]
struct RequestStart(Instant);

#[derive(Debug, Default, Clone, Copy)]
pub struct AccessLog;

#[async_trait]
impl Middleware for AccessLog {
    async fn before(&self, ctx: &mut Context) -> Result<Flow, DispatchError> {
        ctx.insert_data(RequestStart(Instant::now()));
        Ok(Flow::Continue)
    }

    async fn after(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        let elapsed_ms = ctx
            .data::<RequestStart>()
            .map(|start| start.0.elapsed().as_secs_f64() * 1000.0)
            .unwrap_or_default();
        let request_id = ctx
            .data::<RequestId>()
            .map(|id| id.as_str())
            .unwrap_or("-");
        let status = ctx.response().status();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                method = %ctx.method(),
                path = %ctx.path(),
                status = status.as_u16(),
                elapsed_ms,
                "Request completed"
            );
        } else {
            tracing::info!(
                request_id = %request_id,
                method = %ctx.method(),
                path = %ctx.path(),
                status = status.as_u16(),
                elapsed_ms,
                "Request completed"
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "access_log"
    }
}
