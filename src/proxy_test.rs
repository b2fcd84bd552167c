use axum::Router;
use axum::body::Body;
use axum::http::{Request, Uri};
use axum::routing::{any, get};
use tower::ServiceExt as _;

use super::*;
use crate::config::{ProxyTimeouts, ServerConfig};
use crate::routes::api_routes;

// =============================================================
// upstream_url
// =============================================================

#[test]
fn upstream_url_joins_base_and_path() {
    assert_eq!(upstream_url("http://localhost:8000", "auth/login", None), "http://localhost:8000/auth/login");
    assert_eq!(upstream_url("http://localhost:8000/", "/chat", None), "http://localhost:8000/chat");
}

#[test]
fn upstream_url_keeps_query_string() {
    assert_eq!(
        upstream_url("http://b", "chat/sessions", Some("limit=5&page=2")),
        "http://b/chat/sessions?limit=5&page=2"
    );
    assert_eq!(upstream_url("http://b", "chat", Some("")), "http://b/chat");
}

// =============================================================
// Forwarding against an in-process backend
// =============================================================

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<serde_json::Value> {
    let header_str = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
    Json(serde_json::json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "authorization": header_str(header::AUTHORIZATION),
        "content_type": header_str(header::CONTENT_TYPE),
        "cookie": header_str(header::COOKIE),
        "body": body,
    }))
}

async fn unauthorized() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "detail": "Could not validate credentials" })))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/auth/me", get(unauthorized))
        .route("/{*rest}", any(echo));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn state_for(backend_url: &str) -> AppState {
    let config = ServerConfig {
        port: 0,
        backend_url: backend_url.to_owned(),
        timeouts: ProxyTimeouts { request_secs: 5, connect_secs: 2 },
    };
    AppState::new(&config).unwrap()
}

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn forwards_form_login_with_body_and_content_type() {
    let backend = spawn_backend().await;
    let app = api_routes(state_for(&backend));

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=ada%40firm.law&password=pw1"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed = body_json(resp).await;
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["path"], "/auth/login");
    assert_eq!(echoed["content_type"], "application/x-www-form-urlencoded");
    assert_eq!(echoed["body"], "username=ada%40firm.law&password=pw1");
}

#[tokio::test]
async fn forwards_bearer_and_query_but_not_cookies() {
    let backend = spawn_backend().await;
    let app = api_routes(state_for(&backend));

    let req = Request::builder()
        .method("GET")
        .uri("/api/chat/sessions/abc/messages?limit=10")
        .header(header::AUTHORIZATION, "Bearer tok")
        .header(header::COOKIE, "sid=secret")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let echoed = body_json(resp).await;
    assert_eq!(echoed["path"], "/chat/sessions/abc/messages");
    assert_eq!(echoed["query"], "limit=10");
    assert_eq!(echoed["authorization"], "Bearer tok");
    assert!(echoed["cookie"].is_null());
}

#[tokio::test]
async fn keeps_percent_encoded_segments_intact() {
    let backend = spawn_backend().await;
    let app = api_routes(state_for(&backend));

    let req = Request::builder()
        .uri("/api/chat/sessions/a%2Fb%3Fc%23d/messages?q=x%26y")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed = body_json(resp).await;
    assert_eq!(echoed["path"], "/chat/sessions/a%2Fb%3Fc%23d/messages");
    assert_eq!(echoed["query"], "q=x%26y");
}

#[tokio::test]
async fn mirrors_backend_error_status_and_detail() {
    let backend = spawn_backend().await;
    let app = api_routes(state_for(&backend));

    let req = Request::builder().uri("/api/auth/me").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["detail"], "Could not validate credentials");
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    // Bind then drop to get a local port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = api_routes(state_for(&format!("http://{addr}")));
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .body(Body::from(r#"{"session_id":"s","query":"q"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(resp).await["detail"], "Backend unavailable");
}

#[tokio::test]
async fn healthz_is_ok() {
    let app = api_routes(state_for("http://127.0.0.1:9"));
    let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
