//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the booking gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Booking application that allowed requests are forwarded to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Path tier table and credential cookie names.
    pub access: AccessConfig,

    /// Paths the routing layer forwards without consulting the gateway.
    pub exclusions: ExclusionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
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

/// Upstream application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
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

/// A public path entry.
///
/// A bare string is an exact match; the table form can opt into
/// segment-prefix matching:
///
/// ```toml
/// public_paths = ["/", "/login", { path = "/turfs", prefix = true }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PublicPath {
    /// Matches only this exact path.
    Exact(String),
    /// Matches the path and, when `prefix` is set, every segment below it.
    Rule {
        path: String,
        #[serde(default)]
        prefix: bool,
    },
}

impl PublicPath {
    /// Shorthand for a prefix-matching entry.
    pub fn prefix(path: impl Into<String>) -> Self {
        Self::Rule {
            path: path.into(),
            prefix: true,
        }
    }

    /// The configured path, regardless of matching mode.
    pub fn path(&self) -> &str {
        match self {
            Self::Exact(path) | Self::Rule { path, .. } => path,
        }
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self, Self::Rule { prefix: true, .. })
    }
}

/// Access tier table and credential source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Login page; unauthenticated users are sent here with `?redirect=`.
    pub login_path: String,

    /// Cookie carrying the opaque auth token.
    pub token_cookie: String,

    /// Cookie carrying the role string (PLAYER, OWNER, ADMIN).
    pub role_cookie: String,

    /// Paths reachable without credentials.
    pub public_paths: Vec<PublicPath>,

    /// Prefixes requiring the Owner or Admin role.
    pub owner_paths: Vec<String>,

    /// Prefixes requiring the Admin role.
    pub admin_paths: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            token_cookie: "token".to_string(),
            role_cookie: "role".to_string(),
            public_paths: vec![
                PublicPath::Exact("/".to_string()),
                PublicPath::Exact("/login".to_string()),
                PublicPath::Exact("/register".to_string()),
                PublicPath::prefix("/turfs"),
            ],
            owner_paths: vec!["/owner".to_string()],
            admin_paths: vec!["/admin".to_string()],
        }
    }
}

/// Static asset and API exclusions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Segment prefixes (e.g. "/api").
    pub prefixes: Vec<String>,

    /// Exact paths (e.g. "/favicon.ico").
    pub exact: Vec<String>,

    /// File extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            prefixes: vec![
                "/api".to_string(),
                "/_next/static".to_string(),
                "/_next/image".to_string(),
            ],
            exact: vec!["/favicon.ico".to_string()],
            extensions: ["svg", "png", "jpg", "jpeg", "gif", "webp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_path_forms() {
        let access: AccessConfig = toml::from_str(
            r#"
            public_paths = ["/", { path = "/turfs", prefix = true }, { path = "/about" }]
            "#,
        )
        .unwrap();

        assert_eq!(access.public_paths[0], PublicPath::Exact("/".into()));
        assert!(access.public_paths[1].is_prefix());
        assert_eq!(access.public_paths[1].path(), "/turfs");
        assert!(!access.public_paths[2].is_prefix());
        // Unset sections keep their defaults
        assert_eq!(access.login_path, "/login");
        assert_eq!(access.admin_paths, vec!["/admin".to_string()]);
    }
}
