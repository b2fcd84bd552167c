//! API failure type.
//!
//! ERROR HANDLING
//! ==============
//! The `Display` text of every variant is exactly what the UI renders inline,
//! so components can `format!("{e}")` without a separate mapping table.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Cannot connect to server. Is the backend running?")]
    Network(String),
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("{fallback}")]
    Status { status: u16, fallback: &'static str },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("No authentication token")]
    MissingToken,
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body text.
    pub fn from_response(status: u16, body: &str, fallback: &'static str) -> Self {
        match detail_message(body) {
            Some(detail) => Self::Rejected { status, detail },
            None => Self::Status { status, fallback },
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Extract the `detail` field of a FastAPI-style error body.
///
/// String details are returned as-is. Validation errors arrive as a list of
/// objects with a `msg` field; those messages are joined with `"; "`.
pub(crate) fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let text = match parsed.detail {
        serde_json::Value::String(s) => s,
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}
