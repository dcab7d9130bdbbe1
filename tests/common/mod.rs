//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{header::COOKIE, Request},
    middleware,
    routing::any,
    Router,
};
use booking_gateway::config::GatewayConfig;
use booking_gateway::http::{middleware::access_control_middleware, AccessContext, AccessControlState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock upstream on an ephemeral port.
///
/// Every response body is `upstream:<request-target>`.
#[allow(dead_code)]
pub async fn start_echo_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let mut read = 0;
                        while read < buf.len() {
                            let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                            if n == 0 {
                                break;
                            }
                            read += n;
                            if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }

                        let head = String::from_utf8_lossy(&buf[..read]);
                        let target = head.split_whitespace().nth(1).unwrap_or("/");
                        let body = format!("upstream:{target}");
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// A router guarded by the access middleware whose handler reports the
/// attached [`AccessContext`] as `tier=<tier> role=<role>`.
#[allow(dead_code)]
pub fn guarded_app(config: &GatewayConfig) -> Router {
    let state = AccessControlState::from_config(config);
    Router::new()
        .route("/", any(report_context))
        .route("/{*path}", any(report_context))
        .layer(middleware::from_fn_with_state(state, access_control_middleware))
}

#[allow(dead_code)]
async fn report_context(req: Request<Body>) -> String {
    match req.extensions().get::<AccessContext>() {
        Some(ctx) => format!("tier={:?} role={:?}", ctx.tier, ctx.role),
        None => "no-context".to_string(),
    }
}

/// Build a GET request with an optional cookie header.
#[allow(dead_code)]
pub fn get(path: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookies) = cookies {
        builder = builder.header(COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}
