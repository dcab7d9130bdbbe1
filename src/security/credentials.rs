//! Credential extraction from request cookies.
//!
//! The token is opaque; it is read as a plain string and never verified
//! here. The role cookie must hold one of the fixed role strings, anything
//! else is dropped.

use axum::http::{header::COOKIE, HeaderMap};

use crate::security::access_control::Role;

/// Credentials asserted by a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl Credentials {
    /// Read the token and role cookies from request headers.
    ///
    /// All `Cookie` headers are scanned (HTTP/2 may split them). The first
    /// occurrence of a name wins. Non-UTF-8 headers, empty values and
    /// unknown roles are ignored.
    pub fn from_headers(headers: &HeaderMap, token_cookie: &str, role_cookie: &str) -> Self {
        let token = cookie_value(headers, token_cookie)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let role = cookie_value(headers, role_cookie).and_then(|raw| match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring role cookie");
                None
            }
        });

        Self { token, role }
    }
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}
