//! Wire DTOs for the Lexi REST API.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON. Citations arrive as raw retrieval
//! records, so every citation field tolerates absence or `null` and falls back
//! to the same placeholder values the backend uses when it persists them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// USERS
// =============================================================================

/// Firm-level role of an authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Partner,
    Associate,
    Staff,
    Client,
}

impl Role {
    /// Parse a backend `system_role` value, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "partner" => Some(Self::Partner),
            "associate" => Some(Self::Associate),
            "staff" => Some(Self::Staff),
            "client" => Some(Self::Client),
            _ => None,
        }
    }

    /// Capitalized label for headings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Partner => "Partner",
            Self::Associate => "Associate",
            Self::Staff => "Staff",
            Self::Client => "Client",
        }
    }
}

/// Heading label for an optional role; users without one are just "User".
pub fn role_label(role: Option<Role>) -> &'static str {
    role.map_or("User", Role::label)
}

/// The signed-in user as displayed in the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// Login identifier (the account email).
    pub username: String,
    /// Firm role, if the backend reported a known one.
    pub role: Option<Role>,
}

/// Raw `GET /auth/me` payload.
#[derive(Clone, Debug, Deserialize)]
pub struct MeResponse {
    pub email: String,
    #[serde(default)]
    pub system_role: Option<String>,
}

impl From<MeResponse> for User {
    fn from(me: MeResponse) -> Self {
        Self {
            username: me.email,
            role: me.system_role.as_deref().and_then(Role::parse),
        }
    }
}

/// `POST /auth/login` response.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

// =============================================================================
// CHAT
// =============================================================================

/// A persisted conversation thread.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatSession {
    pub id: String,
    #[serde(default = "default_session_name")]
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_session_name() -> String {
    "New Chat".to_owned()
}

/// `POST /chat/sessions` body.
#[derive(Clone, Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub name: &'a str,
}

/// `PATCH /chat/sessions/{id}` body.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateSessionRequest<'a> {
    pub name: &'a str,
}

/// `POST /chat` body.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub query: &'a str,
}

/// `POST /chat` response. The backend names the citations `sources`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Citation>,
}

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Ai,
}

/// A stored chat message as returned by the session history endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<String>,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A retrieved source chunk backing an answer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Citation {
    #[serde(default = "unknown", deserialize_with = "null_as_unknown")]
    pub mongo_document_id: String,
    #[serde(default = "unknown_file", deserialize_with = "null_as_unknown_file")]
    pub filename: String,
    #[serde(default = "unknown", deserialize_with = "null_as_unknown")]
    pub matter_id: String,
    #[serde(default = "unknown", deserialize_with = "null_as_unknown")]
    pub sensitivity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chunk_index: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text_snippet: String,
    /// Similarity score in `0.0..=1.0`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
}

fn unknown() -> String {
    "unknown".to_owned()
}

fn unknown_file() -> String {
    "Unknown File".to_owned()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown))
}

fn null_as_unknown_file<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_file))
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// Content shown in the document viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentData {
    pub title: String,
    pub date: Option<String>,
    pub content: String,
    pub matter_id: Option<String>,
    pub sensitivity: Option<String>,
    pub chunk_index: Option<u32>,
}

impl DocumentData {
    /// Build a viewer document from the chunk a citation points at.
    pub fn from_citation(citation: &Citation) -> Self {
        Self {
            title: citation.filename.clone(),
            date: None,
            content: citation.text_snippet.clone(),
            matter_id: Some(citation.matter_id.clone()),
            sensitivity: Some(citation.sensitivity.clone()),
            chunk_index: Some(citation.chunk_index),
        }
    }
}
