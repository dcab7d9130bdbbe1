//! Access Control Middleware.
//! Normalizes the path, then runs the gateway on every request that is not excluded.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{uri::PathAndQuery, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::{AccessConfig, GatewayConfig};
use crate::http::request::request_id;
use crate::http::response::{redirect_for, HOME_PATH};
use crate::observability::metrics;
use crate::routing::{normalize_path, Exclusions};
use crate::security::{Credentials, Decision, Gateway, Role, Tier};

/// State required for access control. Cheap to clone.
#[derive(Clone)]
pub struct AccessControlState {
    pub gateway: Arc<Gateway>,
    pub exclusions: Arc<Exclusions>,
    pub access: Arc<AccessConfig>,
}

impl AccessControlState {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            gateway: Arc::new(Gateway::from_config(&config.access)),
            exclusions: Arc::new(Exclusions::from_config(&config.exclusions)),
            access: Arc::new(config.access.clone()),
        }
    }
}

/// Context attached to allowed requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessContext {
    pub tier: Tier,
    pub role: Option<Role>,
}

pub async fn access_control_middleware(
    State(state): State<AccessControlState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Normalize once; the upstream receives the path that was classified.
    let path = normalize_path(req.uri().path());
    if path != req.uri().path() {
        match rewrite_path(req.uri(), &path) {
            Some(uri) => {
                tracing::debug!(raw = %req.uri().path(), path = %path, "Normalized request path");
                *req.uri_mut() = uri;
            }
            None => {
                tracing::warn!(
                    request_id = %request_id(&req),
                    raw = %req.uri().path(),
                    "Unrepresentable normalized path"
                );
                let decision = Decision::RedirectToHome;
                metrics::record_decision(&decision);
                return Redirect::temporary(HOME_PATH).into_response();
            }
        }
    }

    // 2. Excluded paths never reach the gateway.
    if state.exclusions.is_excluded(&path) {
        tracing::trace!(path = %path, "Excluded from access control");
        metrics::record_excluded();
        return next.run(req).await;
    }

    // 3. Read credentials and decide.
    let credentials = Credentials::from_headers(
        req.headers(),
        &state.access.token_cookie,
        &state.access.role_cookie,
    );
    let (tier, decision) = state.gateway.evaluate_with_tier(
        &path,
        credentials.token.as_deref(),
        credentials.role,
    );
    metrics::record_decision(&decision);

    // 4. Continue or redirect.
    match redirect_for(&decision, &state.access.login_path) {
        None => {
            req.extensions_mut().insert(AccessContext {
                tier,
                role: credentials.role,
            });
            next.run(req).await
        }
        Some(redirect) => {
            tracing::debug!(
                request_id = %request_id(&req),
                path = %path,
                tier = ?tier,
                role = ?credentials.role,
                decision = decision.label(),
                "Access redirected"
            );
            redirect
        }
    }
}

/// Replace the path of `uri`, keeping scheme, authority and query.
fn rewrite_path(uri: &Uri, path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}
