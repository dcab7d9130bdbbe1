//! Decision to HTTP response mapping.
//!
//! # Responsibilities
//! - Build the login location with the original path as `?redirect=`
//! - Turn redirect decisions into `307 Temporary Redirect` responses
//!
//! # Design Decisions
//! - 307 keeps the method, so a POST to a protected page is replayed after login
//! - The redirect parameter is form-urlencoded; `/` becomes `%2F`

use axum::response::{IntoResponse, Redirect, Response};
use url::form_urlencoded;

use crate::security::Decision;

/// Site root, target of [`Decision::RedirectToHome`].
pub const HOME_PATH: &str = "/";

/// `<login_path>?redirect=<encoded original path>`
pub fn login_location(login_path: &str, original_path: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(original_path.as_bytes()).collect();
    format!("{login_path}?redirect={encoded}")
}

/// The `Location` a decision redirects to; `None` for [`Decision::Allow`].
pub fn location_for(decision: &Decision, login_path: &str) -> Option<String> {
    match decision {
        Decision::Allow => None,
        Decision::RedirectToLogin { original_path } => {
            Some(login_location(login_path, original_path))
        }
        Decision::RedirectToHome => Some(HOME_PATH.to_string()),
    }
}

/// Build the redirect for a decision; `None` for [`Decision::Allow`].
pub fn redirect_for(decision: &Decision, login_path: &str) -> Option<Response> {
    location_for(decision, login_path)
        .map(|location| Redirect::temporary(&location).into_response())
}
