//! Dispatch orchestration.
//!
//! # Data Flow
//! ```text
//! Request
//!     → buffer body (413 when over the limit)
//!     → resolve path (cache hit | matcher → cache put)
//!     → pre middleware (global, then group)   ── Stop ─┐
//!     → resource.handle() | 404 | 405 | 500            │
//!     → post middleware (reverse of what ran)  ◀───────┘
//!     → Response (written once)
//! ```
//!
//! # Design Decisions
//! - Failures never escape `dispatch`; panics are caught per call
//! - Post phase always runs so observability middleware sees every request
//! - 404s are not cached; every miss re-runs the matcher

pub mod dispatcher;
mod guard;

pub use dispatcher::Dispatcher;
