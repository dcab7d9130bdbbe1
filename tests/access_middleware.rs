//! Access middleware driven in-process with `oneshot`.

use axum::{
    http::{header::LOCATION, StatusCode, Uri},
    middleware,
    routing::any,
    Router,
};
use booking_gateway::config::{GatewayConfig, PublicPath};
use booking_gateway::http::{middleware::access_control_middleware, AccessControlState};
use tower::ServiceExt;

mod common;
use common::{get, guarded_app};

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_public_prefix_allowed_without_cookies() {
    let app = guarded_app(&GatewayConfig::default());

    let res = app.oneshot(get("/turfs/123", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "tier=Public role=None");
}

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let app = guarded_app(&GatewayConfig::default());

    let res = app.oneshot(get("/dashboard", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()[LOCATION], "/login?redirect=%2Fdashboard");
}

#[tokio::test]
async fn test_query_string_not_part_of_redirect() {
    let app = guarded_app(&GatewayConfig::default());

    let res = app.oneshot(get("/bookings?page=2", None)).await.unwrap();

    assert_eq!(res.headers()[LOCATION], "/login?redirect=%2Fbookings");
}

#[tokio::test]
async fn test_admin_area() {
    let app = guarded_app(&GatewayConfig::default());

    let res = app
        .clone()
        .oneshot(get("/admin/users", Some("token=tok; role=OWNER")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()[LOCATION], "/");

    let res = app
        .oneshot(get("/admin/users", Some("token=tok; role=ADMIN")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "tier=Admin role=Some(Admin)");
}

#[tokio::test]
async fn test_owner_area() {
    let app = guarded_app(&GatewayConfig::default());

    let res = app
        .clone()
        .oneshot(get("/owner/listings", Some("token=tok; role=PLAYER")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(res.headers()[LOCATION], "/");

    let res = app
        .clone()
        .oneshot(get("/owner/listings", Some("token=tok; role=OWNER")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(get("/owner/listings", Some("token=tok; role=ADMIN")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_forged_role_fails_closed() {
    let app = guarded_app(&GatewayConfig::default());

    let res = app
        .clone()
        .oneshot(get("/admin", Some("token=tok; role=admin")))
        .await
        .unwrap();
    assert_eq!(res.headers()[LOCATION], "/");

    // A role without a token is still unauthenticated
    let res = app.oneshot(get("/admin", Some("role=ADMIN"))).await.unwrap();
    assert_eq!(res.headers()[LOCATION], "/login?redirect=%2Fadmin");
}

#[tokio::test]
async fn test_excluded_paths_skip_gateway() {
    let app = guarded_app(&GatewayConfig::default());

    for path in ["/api/reviews", "/_next/static/app.js", "/favicon.ico", "/img/court.png"] {
        let res = app.clone().oneshot(get(path, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert_eq!(body_text(res).await, "no-context", "{path}");
    }
}

#[tokio::test]
async fn test_custom_table_and_cookie_names() {
    let mut config = GatewayConfig::default();
    config.access.login_path = "/signin".into();
    config.access.token_cookie = "session".into();
    config.access.public_paths = vec![
        PublicPath::Exact("/signin".into()),
        PublicPath::prefix("/venues"),
    ];
    config.access.owner_paths = vec!["/manage".into()];
    let app = guarded_app(&config);

    let res = app.clone().oneshot(get("/venues/4", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The old defaults are no longer public
    let res = app.clone().oneshot(get("/turfs/4", None)).await.unwrap();
    assert_eq!(res.headers()[LOCATION], "/signin?redirect=%2Fturfs%2F4");

    // The default cookie name is not read any more
    let res = app
        .clone()
        .oneshot(get("/manage", Some("token=tok; role=OWNER")))
        .await
        .unwrap();
    assert_eq!(res.headers()[LOCATION], "/signin?redirect=%2Fmanage");

    let res = app
        .oneshot(get("/manage/courts", Some("session=tok; role=OWNER")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "tier=Owner role=Some(Owner)");
}

#[tokio::test]
async fn test_dot_segments_cannot_escape_public_or_excluded_prefix() {
    let app = guarded_app(&GatewayConfig::default());

    for path in ["/turfs/../admin/users", "/api/../admin/users", "/turfs/%2e%2e/admin/users"] {
        let res = app.clone().oneshot(get(path, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(res.headers()[LOCATION], "/login?redirect=%2Fadmin%2Fusers", "{path}");
    }
}

#[tokio::test]
async fn test_encoded_and_doubled_slash_paths_classified_canonically() {
    let app = guarded_app(&GatewayConfig::default());

    for path in ["/%61dmin/users", "//admin/users", "/admin//users/", "/turfs/./../owner"] {
        let res = app
            .clone()
            .oneshot(get(path, Some("token=tok; role=PLAYER")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(res.headers()[LOCATION], "/", "{path}");
    }

    let res = app
        .oneshot(get("//admin/users", Some("token=tok; role=ADMIN")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "tier=Admin role=Some(Admin)");
}

#[tokio::test]
async fn test_trailing_slash_on_exact_public_entry() {
    let app = guarded_app(&GatewayConfig::default());

    for path in ["/login/", "/register/", "//login"] {
        let res = app.clone().oneshot(get(path, None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert_eq!(body_text(res).await, "tier=Public role=None", "{path}");
    }
}

#[tokio::test]
async fn test_normalized_path_reaches_handler() {
    let state = AccessControlState::from_config(&GatewayConfig::default());
    let app = Router::new()
        .route("/{*path}", any(|uri: Uri| async move { uri.to_string() }))
        .layer(middleware::from_fn_with_state(state, access_control_middleware));

    let res = app
        .clone()
        .oneshot(get("/turfs/./123//reviews?page=2", None))
        .await
        .unwrap();
    assert_eq!(body_text(res).await, "/turfs/123/reviews?page=2");

    // Excluded paths are forwarded in normalized form too
    let res = app.oneshot(get("/api//reviews/%7e1", None)).await.unwrap();
    assert_eq!(body_text(res).await, "/api/reviews/~1");
}
