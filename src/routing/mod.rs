//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → pattern::normalize (strip trailing slash)
//!     → cache.rs (memoized lookup, when enabled)
//!     → matcher.rs (walk route table, descend into groups)
//!     → Return: Match (route + params + group middleware) or no match
//!
//! Registration (at startup):
//!     add / add_group / insert
//!     → route.rs (parse patterns, build ordered table)
//!     → Frozen once the Dispatcher is shared
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable while serving
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same path always matches same route
//! - First match wins (registration order)

pub mod cache;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod route;

pub use cache::ResolutionCache;
pub use matcher::{match_route, Match};
pub use params::Params;
pub use pattern::{Pattern, PatternError};
pub use route::{Route, RouteGroup};
