//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML, and every
//! section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Dispatcher behaviour (resolution cache, body limit).
    pub dispatch: DispatchConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Access control for protected route groups.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Consult and populate the resolution cache.
    pub use_cache: bool,

    /// Maximum buffered request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Log one line per request.
    pub access_log: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            access_log: true,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Access control configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Bearer token required by protected groups. `None` disables them.
    pub api_key: Option<String>,

    /// Add nosniff / frame-deny headers to every response.
    pub security_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            security_headers: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert!(config.dispatch.use_cache);
        assert_eq!(config.dispatch.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_override() {
        let config: RouterConfig = toml::from_str(
            r#"
            [dispatch]
            use_cache = false

            [observability]
            log_format = "json"

            [security]
            api_key = "secret"
            "#,
        )
        .unwrap();
        assert!(!config.dispatch.use_cache);
        assert_eq!(config.dispatch.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.security.api_key.as_deref(), Some("secret"));
        assert!(config.security.security_headers);
    }
}
