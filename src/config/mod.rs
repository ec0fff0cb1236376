//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → consumed once at startup by the Dispatcher and HttpServer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table never reloads
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    DispatchConfig, ListenerConfig, LogFormat, ObservabilityConfig, RouterConfig, SecurityConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
