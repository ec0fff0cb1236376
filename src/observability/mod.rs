//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher / middleware produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields, not formatted strings
//! - Request ID flows through middleware into every access-log line
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
