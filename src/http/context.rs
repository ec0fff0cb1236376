//! Per-request context handed to middleware and resources.
//!
//! # Responsibilities
//! - Expose the request line, headers, query, body and path parameters
//! - Carry typed per-request data between middleware and resources
//! - Accumulate the response until dispatch finalizes it

use axum::body::Bytes;
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap, Method, StatusCode, Uri};
use serde::Serialize;

use crate::error::DispatchError;
use crate::http::response::Reply;
use crate::routing::Params;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

/// Request/response state for one dispatch.
#[derive(Debug)]
pub struct Context {
    parts: Parts,
    body: Bytes,
    params: Params,
    reply: Reply,
}

impl Context {
    pub(crate) fn new(parts: Parts, body: Bytes) -> Self {
        Self {
            parts,
            body,
            params: Params::new(),
            reply: Reply::default(),
        }
    }

    pub(crate) fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Request path as received (not normalized).
    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Header value as text, if present and visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Path parameter bound by the matched pattern.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// First value of a query-string parameter, percent-decoded.
    pub fn query(&self, name: &str) -> Option<String> {
        let query = self.parts.uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Typed per-request value stored by an earlier middleware.
    pub fn data<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.parts.extensions.get::<T>()
    }

    pub fn data_mut(&mut self) -> &mut Extensions {
        &mut self.parts.extensions
    }

    /// Store a typed per-request value, returning any previous one.
    pub fn insert_data<T: Clone + Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.parts.extensions.insert(value)
    }

    /// The response written so far.
    pub fn response(&self) -> &Reply {
        &self.reply
    }

    pub fn response_mut(&mut self) -> &mut Reply {
        &mut self.reply
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.reply.set_status(status);
    }

    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.reply.headers_mut().insert(name, value);
    }

    /// Write a plain-text body.
    pub fn render(&mut self, body: impl Into<String>) {
        self.set_header(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
        self.reply.set_body(body.into());
    }

    /// Serialize `value` as the JSON body.
    pub fn render_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), DispatchError> {
        let body = serde_json::to_vec(value)
            .map_err(|e| DispatchError::Internal(format!("json encoding failed: {e}")))?;
        self.set_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_JSON),
        );
        self.reply.set_body(body);
        Ok(())
    }

    /// Redirect to `location` with a 3xx `status`.
    pub fn redirect(&mut self, location: &str, status: StatusCode) -> Result<(), DispatchError> {
        let value = HeaderValue::from_str(location)
            .map_err(|e| DispatchError::Internal(format!("invalid redirect location: {e}")))?;
        self.set_status(status);
        self.set_header(header::LOCATION, value);
        Ok(())
    }

    /// Replace the response with the error's status and public message.
    ///
    /// Headers written before the failure are discarded.
    pub(crate) fn write_error(&mut self, err: &DispatchError) {
        self.reply = Reply::default();
        self.set_status(err.status_code());
        self.render(err.public_message());
    }

    pub(crate) fn into_reply(self) -> Reply {
        self.reply
    }
}
