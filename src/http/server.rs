//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router catching every path
//! - Wire up middleware (request ID, tracing, timeout, access control)
//! - Bind server to listener
//! - Forward allowed and excluded requests to the upstream application

use std::str::FromStr;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUri, PathAndQuery, Scheme},
        Request, StatusCode, Uri, Version,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::middleware::{access_control_middleware, AccessControlState};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::observability::metrics;

/// Error building the server from a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid upstream address `{address}`: {source}")]
    Upstream {
        address: String,
        #[source]
        source: InvalidUri,
    },
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub access: AccessControlState,
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
}

/// HTTP server for the booking gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The tier table is compiled here and stays fixed for the server's lifetime.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let upstream = Authority::from_str(&config.upstream.address).map_err(|source| {
            ServerError::Upstream {
                address: config.upstream.address.clone(),
                source,
            }
        })?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            access: AccessControlState::from_config(&config),
            client,
            upstream,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(forward_handler))
            .route("/{*path}", any(forward_handler))
            .layer(middleware::from_fn_with_state(
                state.access.clone(),
                access_control_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id(req),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// Run the server until the shutdown receiver fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Forward a request to the upstream application. Only the URI authority
/// and protocol version change; the path was already normalized upstream of here.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(&request).to_string();
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(state.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };
    // The pooled client speaks HTTP/1.1 upstream whatever the client used.
    parts.version = Version::HTTP_11;

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_upstream(response.status().as_u16(), start);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_upstream(StatusCode::BAD_GATEWAY.as_u16(), start);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
