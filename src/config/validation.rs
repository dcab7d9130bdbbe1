//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Reject tier tables that would loop (login page not public)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;
use crate::routing::matcher::{Matcher, PathMatcher};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: path `{path}` must start with '/'")]
    RelativePath { field: &'static str, path: String },

    #[error("{field}: `{address}` is not a valid socket address")]
    InvalidAddress { field: &'static str, address: String },

    #[error("{field}: cookie name `{name}` is empty or contains '=', ';' or whitespace")]
    InvalidCookieName { field: &'static str, name: String },

    #[error("access.login_path `{0}` is not covered by access.public_paths")]
    LoginNotPublic(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("exclusions.extensions: `{0}` must not be empty or start with '.'")]
    InvalidExtension(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    check_address(&mut errors, "upstream.address", &config.upstream.address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let access = &config.access;
    check_cookie(&mut errors, "access.token_cookie", &access.token_cookie);
    check_cookie(&mut errors, "access.role_cookie", &access.role_cookie);

    check_path(&mut errors, "access.login_path", &access.login_path);
    for entry in &access.public_paths {
        check_path(&mut errors, "access.public_paths", entry.path());
    }
    for path in &access.owner_paths {
        check_path(&mut errors, "access.owner_paths", path);
    }
    for path in &access.admin_paths {
        check_path(&mut errors, "access.admin_paths", path);
    }

    let login_is_public = access
        .public_paths
        .iter()
        .map(PathMatcher::from)
        .any(|m| m.matches(&access.login_path));
    if !login_is_public {
        errors.push(ValidationError::LoginNotPublic(access.login_path.clone()));
    }

    for path in config.exclusions.prefixes.iter().chain(&config.exclusions.exact) {
        check_path(&mut errors, "exclusions", path);
    }
    for ext in &config.exclusions.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            errors.push(ValidationError::InvalidExtension(ext.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, address: &str) {
    if address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            address: address.to_string(),
        });
    }
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, path: &str) {
    if !path.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field,
            path: path.to_string(),
        });
    }
}

fn check_cookie(errors: &mut Vec<ValidationError>, field: &'static str, name: &str) {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| c == '=' || c == ';' || c.is_whitespace());
    if invalid {
        errors.push(ValidationError::InvalidCookieName {
            field,
            name: name.to_string(),
        });
    }
}
