//! Shared resources and middleware for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use std::sync::{Arc, Mutex};

use resource_router::{Context, DispatchError, Flow, HandlerResult, Middleware, Resource};

/// Writes `name:param1:param2...` so tests can see which route answered.
pub struct Named {
    pub name: &'static str,
}

#[async_trait]
impl Resource for Named {
    async fn get(&self, ctx: &mut Context) -> HandlerResult {
        let mut body = self.name.to_string();
        let mut params: Vec<(&str, &str)> = ctx.params().iter().collect();
        params.sort();
        for (_, value) in params {
            body.push(':');
            body.push_str(value);
        }
        ctx.render(body);
        Ok(())
    }

    async fn post(&self, ctx: &mut Context) -> HandlerResult {
        let body = ctx.body().clone();
        ctx.set_status(StatusCode::CREATED);
        ctx.response_mut().set_body(body);
        Ok(())
    }
}

/// Panics on every GET.
pub struct Exploding;

#[async_trait]
impl Resource for Exploding {
    async fn get(&self, _ctx: &mut Context) -> HandlerResult {
        panic!("resource exploded");
    }
}

/// Shared event log for ordering assertions.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// Records `pre:<tag>` and `post:<tag>`, optionally stopping the chain.
pub struct Recorder {
    pub tag: &'static str,
    pub journal: Journal,
    pub stop: bool,
}

impl Recorder {
    pub fn new(tag: &'static str, journal: &Journal) -> Self {
        Self {
            tag,
            journal: Arc::clone(journal),
            stop: false,
        }
    }

    pub fn stopping(tag: &'static str, journal: &Journal) -> Self {
        Self {
            stop: true,
            ..Self::new(tag, journal)
        }
    }
}

#[async_trait]
impl Middleware for Recorder {
    async fn before(&self, ctx: &mut Context) -> Result<Flow, DispatchError> {
        self.journal.lock().unwrap().push(format!("pre:{}", self.tag));
        if self.stop {
            ctx.set_status(StatusCode::FORBIDDEN);
            ctx.render("stopped");
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }

    async fn after(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("post:{}:{}", self.tag, ctx.response().status().as_u16()));
        Ok(())
    }
}

/// Resource that logs its own invocation into a journal.
pub struct Journaled {
    pub journal: Journal,
}

#[async_trait]
impl Resource for Journaled {
    async fn get(&self, ctx: &mut Context) -> HandlerResult {
        self.journal.lock().unwrap().push("resource".to_string());
        ctx.render("ok");
        Ok(())
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Starts a redirect and a cookie, then panics.
pub struct HalfDone;

#[async_trait]
impl Resource for HalfDone {
    async fn get(&self, ctx: &mut Context) -> HandlerResult {
        ctx.redirect("/elsewhere", StatusCode::FOUND)?;
        ctx.set_header(
            axum::http::header::SET_COOKIE,
            axum::http::HeaderValue::from_static("session=half"),
        );
        panic!("failed after writing headers");
    }
}

/// Resource whose lifecycle hooks write to a journal.
pub struct Hooked {
    pub journal: Journal,
    pub deny: bool,
}

#[async_trait]
impl Resource for Hooked {
    async fn before(&self, _ctx: &mut Context) -> HandlerResult {
        self.journal.lock().unwrap().push("hook:before".to_string());
        if self.deny {
            return Err(DispatchError::status(StatusCode::FORBIDDEN, "denied"));
        }
        Ok(())
    }

    async fn get(&self, ctx: &mut Context) -> HandlerResult {
        let id = ctx.param("id").unwrap_or("-").to_string();
        self.journal.lock().unwrap().push(format!("resource:{id}"));
        ctx.render(id);
        Ok(())
    }

    async fn after(&self, ctx: &mut Context) -> HandlerResult {
        self.journal
            .lock()
            .unwrap()
            .push(format!("hook:after:{}", ctx.response().status().as_u16()));
        Ok(())
    }
}

/// Middleware that panics in its pre phase.
pub struct PanicBefore;

#[async_trait]
impl Middleware for PanicBefore {
    async fn before(&self, _ctx: &mut Context) -> Result<Flow, DispatchError> {
        panic!("middleware exploded");
    }
}

/// Middleware that panics in its post phase.
pub struct PanicAfter;

#[async_trait]
impl Middleware for PanicAfter {
    async fn after(&self, _ctx: &mut Context) -> Result<(), DispatchError> {
        panic!("middleware exploded late");
    }
}
