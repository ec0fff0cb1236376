//! Request ID assignment.
//!
//! # Responsibilities
//! - Reuse an incoming `x-request-id` or generate a UUID v4
//! - Make the ID available to later middleware and resources
//! - Echo the ID on the response
//!
//! # Design Decisions
//! - Request ID assigned as early as possible for tracing; insert this
//!   middleware first

use async_trait::async_trait;
use axum::http::header::{HeaderName, HeaderValue};
use uuid::Uuid;

use crate::error::DispatchError;
use crate::http::context::Context;
use crate::http::middleware::{Flow, Middleware};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The ID assigned to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Assigns a [`RequestId`] to every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestIdMiddleware;

#[async_trait]
impl Middleware for RequestIdMiddleware {
    async fn before(&self, ctx: &mut Context) -> Result<Flow, DispatchError> {
        let id = ctx
            .header(X_REQUEST_ID)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        ctx.insert_data(RequestId(id));
        Ok(Flow::Continue)
    }

    async fn after(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        let Some(id) = ctx.data::<RequestId>() else {
            return Ok(());
        };
        if let Ok(value) = HeaderValue::from_str(id.as_str()) {
            ctx.set_header(HeaderName::from_static(X_REQUEST_ID), value);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "request_id"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::Request;

    fn context(id: Option<&str>) -> Context {
        let mut builder = Request::builder().uri("/x");
        if let Some(id) = id {
            builder = builder.header(X_REQUEST_ID, id);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        Context::new(parts, Bytes::new())
    }

    #[tokio::test]
    async fn test_generates_id() {
        let mut ctx = context(None);
        RequestIdMiddleware.before(&mut ctx).await.unwrap();
        let id = ctx.data::<RequestId>().unwrap().clone();
        assert!(Uuid::parse_str(id.as_str()).is_ok());

        RequestIdMiddleware.after(&mut ctx).await.unwrap();
        assert_eq!(ctx.response().headers()[X_REQUEST_ID], id.as_str());
    }

    #[tokio::test]
    async fn test_preserves_incoming_id() {
        let mut ctx = context(Some("abc-123"));
        RequestIdMiddleware.before(&mut ctx).await.unwrap();
        assert_eq!(ctx.data::<RequestId>().unwrap().as_str(), "abc-123");
    }
}
