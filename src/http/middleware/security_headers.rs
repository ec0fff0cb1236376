//! Security response headers.
//!
//! Adds `x-content-type-options: nosniff` and `x-frame-options: DENY` to
//! every response, unless a resource already set them.

use async_trait::async_trait;
use axum::http::header::{self, HeaderValue};

use crate::error::DispatchError;
use crate::http::context::Context;
use crate::http::middleware::Middleware;

#[derive(Debug, Default, Clone, Copy)]
pub struct SecurityHeaders;

#[async_trait]
impl Middleware for SecurityHeaders {
    async fn after(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        let headers = ctx.response_mut().headers_mut();
        headers
            .entry(header::X_CONTENT_TYPE_OPTIONS)
            .or_insert(HeaderValue::from_static("nosniff"));
        headers
            .entry(header::X_FRAME_OPTIONS)
            .or_insert(HeaderValue::from_static("DENY"));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "security_headers"
    }
}
