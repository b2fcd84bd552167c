//! Same-origin forwarding of `/api/*` calls to the backend API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client talks to `/api/...` on the origin that served it, so
//! the backend needs no CORS setup. Requests are relayed verbatim apart from
//! headers: only auth and content negotiation headers cross the hop.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, Bytes};
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "api forward failed");
        let detail = match &self {
            Self::Upstream(e) if e.is_timeout() => "Backend timed out",
            Self::Upstream(_) => "Backend unavailable",
        };
        (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// Backend URL for a forwarded `path` and raw query string.
pub(crate) fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Route prefix stripped before forwarding.
const API_PREFIX: &str = "/api";

/// `ANY /api/{*path}`: relay to the backend and mirror its answer.
///
/// The path is taken from the raw request URI so percent-encoded segments
/// (`%2F`, `%3F`) reach the backend unchanged.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path = uri.path().strip_prefix(API_PREFIX).unwrap_or(uri.path());
    let url = upstream_url(&state.backend_url, path, uri.query());
    let mut upstream = state.http.request(method.clone(), &url);
    for name in [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT] {
        if let Some(value) = headers.get(&name) {
            upstream = upstream.header(name, value);
        }
    }
    if !body.is_empty() {
        upstream = upstream.body(body);
    }

    let resp = upstream.send().await?;
    let status = resp.status();
    tracing::debug!(%method, %url, status = status.as_u16(), "api forwarded");

    let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = resp.bytes().await?;

    let mut out = Response::new(Body::from(bytes));
    *out.status_mut() = status;
    if let Some(content_type) = content_type {
        out.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(out)
}
