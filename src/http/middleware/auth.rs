//! Bearer-token access control.
//! Short-circuits with 401 when the `Authorization` header is missing or wrong.

use async_trait::async_trait;
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use tracing::warn;

use crate::error::DispatchError;
use crate::http::context::Context;
use crate::http::middleware::{Flow, Middleware};

/// Marker attached to requests that passed authentication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedToken;

/// Requires `Authorization: Bearer <api_key>`.
#[derive(Clone)]
pub struct BearerAuth {
    api_key: String,
}

impl BearerAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    fn reject(ctx: &mut Context, reason: &str) -> Flow {
        warn!(path = %ctx.path(), reason, "Rejected unauthenticated request");
        ctx.set_status(StatusCode::UNAUTHORIZED);
        ctx.set_header(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Bearer"),
        );
        ctx.render(reason.to_string());
        Flow::Stop
    }
}

#[async_trait]
impl Middleware for BearerAuth {
    async fn before(&self, ctx: &mut Context) -> Result<Flow, DispatchError> {
        let token = match ctx.header(header::AUTHORIZATION.as_str()) {
            Some(value) => value.strip_prefix("Bearer ").map(str::to_string),
            None => return Ok(Self::reject(ctx, "Missing Authorization header")),
        };

        match token {
            Some(token) if token == self.api_key => {
                ctx.insert_data(AuthenticatedToken);
                Ok(Flow::Continue)
            }
            _ => Ok(Self::reject(ctx, "Invalid bearer token")),
        }
    }

    fn name(&self) -> &'static str {
        "bearer_auth"
    }
}
