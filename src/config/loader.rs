//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PublicPath;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:8443"

            [upstream]
            address = "10.0.0.5:3000"

            [access]
            login_path = "/signin"
            token_cookie = "session"
            public_paths = ["/", "/signin", { path = "/venues", prefix = true }]
            owner_paths = ["/manage"]
            admin_paths = ["/staff", "/reports"]

            [exclusions]
            extensions = ["png"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8443");
        assert_eq!(config.upstream.address, "10.0.0.5:3000");
        assert_eq!(config.access.login_path, "/signin");
        assert_eq!(config.access.token_cookie, "session");
        assert_eq!(config.access.role_cookie, "role");
        assert_eq!(config.access.public_paths[2], PublicPath::prefix("/venues"));
        assert_eq!(config.access.admin_paths.len(), 2);
        assert_eq!(config.exclusions.extensions, vec!["png".to_string()]);
        assert_eq!(config.exclusions.exact, vec!["/favicon.ico".to_string()]);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_config("[access\nlogin_path = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_error() {
        let err = parse_config(
            r#"
            [access]
            login_path = "/signin"
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::LoginNotPublic("/signin".into())]);
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/booking-gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
