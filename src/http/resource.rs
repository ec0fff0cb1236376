//! Resources: the handlers routes are bound to.
//!
//! A resource implements only the verbs it supports; every other verb falls
//! back to a "method not allowed" error, which dispatch turns into a 405.
//!
//! `before` and `after` are optional lifecycle hooks wrapped around the verb
//! operation on every route the resource is bound to:
//!
//! ```text
//! group/global middleware before → Resource::before → verb → Resource::after → middleware after
//! ```
//!
//! An error from `before` skips the verb operation. `after` runs whenever
//! `before` was called, and sees the final status.

use async_trait::async_trait;
use axum::http::Method;

use crate::error::{DispatchError, HandlerResult};
use crate::http::context::Context;

fn not_allowed(ctx: &Context) -> HandlerResult {
    Err(DispatchError::MethodNotAllowed {
        method: ctx.method().to_string(),
    })
}

/// A handler exposing one operation per HTTP method.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Lifecycle hook run before the verb operation.
    async fn before(&self, _ctx: &mut Context) -> HandlerResult {
        Ok(())
    }

    /// Lifecycle hook run after the verb operation, even when it failed.
    async fn after(&self, _ctx: &mut Context) -> HandlerResult {
        Ok(())
    }

    async fn get(&self, ctx: &mut Context) -> HandlerResult {
        not_allowed(ctx)
    }

    async fn post(&self, ctx: &mut Context) -> HandlerResult {
        not_allowed(ctx)
    }

    async fn put(&self, ctx: &mut Context) -> HandlerResult {
        not_allowed(ctx)
    }

    async fn patch(&self, ctx: &mut Context) -> HandlerResult {
        not_allowed(ctx)
    }

    async fn delete(&self, ctx: &mut Context) -> HandlerResult {
        not_allowed(ctx)
    }

    async fn head(&self, ctx: &mut Context) -> HandlerResult {
        not_allowed(ctx)
    }

    async fn options(&self, ctx: &mut Context) -> HandlerResult {
        not_allowed(ctx)
    }

    /// Route the request to the operation matching its verb.
    async fn handle(&self, ctx: &mut Context) -> HandlerResult {
        let method = ctx.method().clone();
        match method {
            Method::GET => self.get(ctx).await,
            Method::POST => self.post(ctx).await,
            Method::PUT => self.put(ctx).await,
            Method::PATCH => self.patch(ctx).await,
            Method::DELETE => self.delete(ctx).await,
            Method::HEAD => self.head(ctx).await,
            Method::OPTIONS => self.options(ctx).await,
            _ => not_allowed(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::{Request, StatusCode};

    struct Echo;

    #[async_trait]
    impl Resource for Echo {
        async fn get(&self, ctx: &mut Context) -> HandlerResult {
            ctx.render("echo");
            Ok(())
        }
    }

    fn context(method: Method) -> Context {
        let (parts, ()) = Request::builder()
            .method(method)
            .uri("/echo")
            .body(())
            .unwrap()
            .into_parts();
        Context::new(parts, Bytes::new())
    }

    #[tokio::test]
    async fn test_handle_routes_by_verb() {
        let mut ctx = context(Method::GET);
        Echo.handle(&mut ctx).await.unwrap();
        assert_eq!(ctx.response().body().as_ref(), b"echo");
    }

    #[tokio::test]
    async fn test_unsupported_verb() {
        let mut ctx = context(Method::DELETE);
        let err = Echo.handle(&mut ctx).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);

        let mut ctx = context(Method::TRACE);
        assert!(Echo.handle(&mut ctx).await.is_err());
    }
}
