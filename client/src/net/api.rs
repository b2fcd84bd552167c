//! REST API helpers for the Lexi backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! Every authenticated call sends `Authorization: Bearer <token>`. Requests go
//! to [`API_BASE`], which the shell server forwards to the backend unless the
//! build overrides it with `LEXI_API_BASE`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ApiError;
use super::types::{ChatResponse, ChatSession, Message, User};
#[cfg(feature = "hydrate")]
use super::types::{ChatRequest, CreateSessionRequest, MeResponse, TokenResponse, UpdateSessionRequest};

/// Base URL for API calls.
pub const API_BASE: &str = match option_env!("LEXI_API_BASE") {
    Some(base) => base,
    None => "/api",
};

const LOGIN_FAILED: &str = "Invalid credentials";
const PROFILE_FAILED: &str = "Failed to fetch user profile";
const SESSION_FAILED: &str = "Failed to create session";
const SESSIONS_FAILED: &str = "Failed to load sessions";
const HISTORY_FAILED: &str = "Failed to load messages";
const RENAME_FAILED: &str = "Failed to update session";
const DELETE_FAILED: &str = "Failed to delete session";
const CHAT_FAILED: &str = "Failed to fetch answer";

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn session_path(session_id: &str) -> String {
    format!("/chat/sessions/{session_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn session_messages_path(session_id: &str) -> String {
    format!("{}/messages", session_path(session_id))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(feature = "hydrate")]
fn network(e: gloo_net::Error) -> ApiError {
    log::warn!("request failed: {e}");
    ApiError::Network(e.to_string())
}

/// Decode a JSON body, or classify the failure from the status and body.
#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
    fallback: &'static str,
) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body, fallback);
        log::warn!("{} -> {status}: {err}", resp.url());
        return Err(err);
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Like [`read_json`] for calls whose success body carries nothing needed.
#[cfg(feature = "hydrate")]
async fn read_ok(resp: gloo_net::http::Response, fallback: &'static str) -> Result<(), ApiError> {
    read_json::<serde_json::Value>(resp, fallback).await.map(|_| ())
}

/// Exchange credentials for a bearer token via `POST /auth/login`.
///
/// The backend expects an OAuth2 password form, so the body is
/// `application/x-www-form-urlencoded` rather than JSON.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the credentials are rejected.
pub async fn login(username: &str, password: &str) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let form = web_sys::UrlSearchParams::new().map_err(|_| ApiError::Unavailable)?;
        form.append("username", username);
        form.append("password", password);
        let resp = gloo_net::http::Request::post(&endpoint(API_BASE, "/auth/login"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        let body: TokenResponse = read_json(resp, LOGIN_FAILED).await?;
        Ok(body.access_token)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password, LOGIN_FAILED);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the user that owns `token` from `GET /auth/me`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the token is invalid.
pub async fn fetch_me(token: &str) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&endpoint(API_BASE, "/auth/me"))
            .header("Authorization", &bearer(token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(network)?;
        let me: MeResponse = read_json(resp, PROFILE_FAILED).await?;
        Ok(User::from(me))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, PROFILE_FAILED);
        Err(ApiError::Unavailable)
    }
}

/// Tell the backend the session is over via `POST /auth/logout`.
///
/// Best effort: bearer tokens are stateless, so the outcome is ignored.
pub async fn logout(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post(&endpoint(API_BASE, "/auth/logout"))
            .header("Authorization", &bearer(token))
            .send()
            .await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

/// Open a new conversation via `POST /chat/sessions`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn create_session(token: &str, name: &str) -> Result<ChatSession, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&endpoint(API_BASE, "/chat/sessions"))
            .header("Authorization", &bearer(token))
            .json(&CreateSessionRequest { name })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(resp, SESSION_FAILED).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, name, SESSION_FAILED);
        Err(ApiError::Unavailable)
    }
}

/// List the user's conversations via `GET /chat/sessions`, newest first.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects it.
pub async fn list_sessions(token: &str) -> Result<Vec<ChatSession>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&endpoint(API_BASE, "/chat/sessions"))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(network)?;
        read_json(resp, SESSIONS_FAILED).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, SESSIONS_FAILED);
        Err(ApiError::Unavailable)
    }
}

/// Load the stored history of one conversation.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the session is missing, or
/// it belongs to another user.
pub async fn fetch_session_messages(token: &str, session_id: &str) -> Result<Vec<Message>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = endpoint(API_BASE, &session_messages_path(session_id));
        let resp = gloo_net::http::Request::get(&url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(network)?;
        read_json(resp, HISTORY_FAILED).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, session_id, HISTORY_FAILED);
        Err(ApiError::Unavailable)
    }
}

/// Ask one question in `session_id` via `POST /chat`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend cannot answer.
pub async fn send_chat(token: &str, session_id: &str, query: &str) -> Result<ChatResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&endpoint(API_BASE, "/chat"))
            .header("Authorization", &bearer(token))
            .json(&ChatRequest { session_id, query })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(resp, CHAT_FAILED).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, session_id, query, CHAT_FAILED);
        Err(ApiError::Unavailable)
    }
}

/// Give a conversation a new name via `PATCH /chat/sessions/{id}`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the session is missing, or
/// it belongs to another user.
pub async fn rename_session(token: &str, session_id: &str, name: &str) -> Result<ChatSession, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::patch(&endpoint(API_BASE, &session_path(session_id)))
            .header("Authorization", &bearer(token))
            .json(&UpdateSessionRequest { name })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(resp, RENAME_FAILED).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, session_id, name, RENAME_FAILED);
        Err(ApiError::Unavailable)
    }
}

/// Delete a conversation and its messages via `DELETE /chat/sessions/{id}`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails, the session is missing, or
/// it belongs to another user.
pub async fn delete_session(token: &str, session_id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&endpoint(API_BASE, &session_path(session_id)))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(network)?;
        read_ok(resp, DELETE_FAILED).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, session_id, DELETE_FAILED);
        Err(ApiError::Unavailable)
    }
}
