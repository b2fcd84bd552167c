//! Case assistant conversation state.
//!
//! DESIGN
//! ======
//! Transitions live here as plain methods so the chat panel only sequences
//! network calls and every visible state change stays unit-testable.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::error::ApiError;
use crate::net::types::{ChatResponse, ChatSession, Citation, Message, MessageRole, Role, User};

/// Shown to signed-out visitors in place of a conversation.
pub const SIGNED_OUT_WELCOME: &str = "Hello, please log in to access the case assistant.";

/// Replaces the conversation when no session could be opened.
pub const SESSION_ERROR: &str = "⚠️ Sorry, I encountered an error connecting to the secure server.";

/// Name given to sessions opened from the panel.
pub const NEW_SESSION_NAME: &str = "New Chat";

/// Greeting for a freshly opened session, tailored to the user's role.
pub fn welcome_message(user: Option<&User>) -> String {
    let Some(user) = user else {
        return SIGNED_OUT_WELCOME.to_owned();
    };
    let name = &user.username;
    match user.role {
        Some(Role::Partner) => format!(
            "Hello {name}, welcome back! As a partner, you have full access to all case documents, client communications, and strategic insights. How can I assist you with your case today?"
        ),
        Some(Role::Associate) => format!(
            "Hello {name}! As an associate, you can access case documents, research materials, and draft responses. What would you like to explore today?"
        ),
        Some(Role::Staff) => format!(
            "Hello {name}! As staff, you have access to administrative functions and case support. How can I help you today?"
        ),
        Some(Role::Client) => format!(
            "Hello {name}, thank you for using our legal services. As a client, you can view your case documents and ask questions about your matter. How can I help you today?"
        ),
        None => format!("Hello {name}, welcome! How can I assist you today?"),
    }
}

/// A single rendered chat bubble.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    /// Stable key for keyed rendering; server id for history, random otherwise.
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub citations: Vec<Citation>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::local(MessageRole::User, content.into(), Vec::new())
    }

    pub fn ai(content: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self::local(MessageRole::Ai, content.into(), citations)
    }

    fn local(role: MessageRole, content: String, citations: Vec<Citation>) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, content, citations }
    }
}

impl From<Message> for ChatMessage {
    fn from(msg: Message) -> Self {
        Self {
            id: msg.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            role: msg.role,
            content: msg.content,
            citations: msg.citations,
        }
    }
}

/// Conversation state for the case assistant panel.
///
/// Async work captures [`ChatState::epoch`] when it starts and hands it back
/// with its result. Signing out or switching sessions bumps the epoch, so a
/// late reply for a conversation that is no longer shown is dropped.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// Active backend session; sending is impossible without one.
    pub session_id: Option<String>,
    /// Known sessions for the picker, newest first.
    pub sessions: Vec<ChatSession>,
    /// A session is being created or its history loaded.
    pub initializing: bool,
    /// A chat turn is awaiting its answer.
    pub sending: bool,
    /// Bumped whenever the shown conversation is replaced.
    pub epoch: u64,
}

impl ChatState {
    fn bump(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Forget everything, as on sign-out.
    pub fn reset(&mut self) {
        let epoch = self.epoch;
        *self = Self { epoch, ..Self::default() };
        self.bump();
    }

    /// Start opening a session (new or from history); returns its epoch.
    pub fn begin_session(&mut self) -> u64 {
        self.initializing = true;
        self.sending = false;
        self.session_id = None;
        self.messages.clear();
        self.bump()
    }

    /// Stop initializing without a session (e.g. no stored token).
    pub fn abort_session(&mut self) {
        self.initializing = false;
    }

    /// A new session opened; greet the user. Returns `false` if stale.
    pub fn session_ready(&mut self, epoch: u64, session: ChatSession, welcome: String) -> bool {
        if !self.is_current(epoch) {
            return false;
        }
        self.session_id = Some(session.id.clone());
        self.messages = vec![ChatMessage::ai(welcome, Vec::new())];
        self.initializing = false;
        if !self.sessions.iter().any(|s| s.id == session.id) {
            self.sessions.insert(0, session);
        }
        true
    }

    /// Opening a session failed; only the error bubble remains.
    pub fn session_failed(&mut self, epoch: u64) {
        if !self.is_current(epoch) {
            return;
        }
        self.session_id = None;
        self.messages = vec![ChatMessage::ai(SESSION_ERROR, Vec::new())];
        self.initializing = false;
    }

    /// Replace the picker contents, keeping the active session listed.
    pub fn set_sessions(&mut self, epoch: u64, sessions: Vec<ChatSession>) {
        if !self.is_current(epoch) {
            return;
        }
        let active = self
            .session_id
            .as_ref()
            .filter(|id| !sessions.iter().any(|s| &s.id == *id))
            .and_then(|id| self.sessions.iter().find(|s| &s.id == id).cloned());
        self.sessions = sessions;
        if let Some(active) = active {
            self.sessions.insert(0, active);
        }
    }

    /// A stored session's history arrived; make it the active one.
    pub fn history_loaded(&mut self, epoch: u64, session_id: String, history: Vec<Message>) {
        if !self.is_current(epoch) {
            return;
        }
        self.session_id = Some(session_id);
        self.messages = history.into_iter().map(ChatMessage::from).collect();
        self.initializing = false;
    }

    /// A session was renamed; update its picker entry if still listed.
    pub fn session_renamed(&mut self, session: ChatSession) {
        if let Some(entry) = self.sessions.iter_mut().find(|s| s.id == session.id) {
            *entry = session;
        }
    }

    /// A session was deleted; returns whether it was the active one.
    pub fn session_deleted(&mut self, session_id: &str) -> bool {
        self.sessions.retain(|s| s.id != session_id);
        self.session_id.as_deref() == Some(session_id)
    }

    /// Whether `input` may be sent right now.
    pub fn can_send(&self, input: &str, signed_in: bool) -> bool {
        signed_in && !input.trim().is_empty() && !self.sending && self.session_id.is_some()
    }

    /// Input controls are locked while busy or sessionless.
    pub fn input_disabled(&self) -> bool {
        self.sending || self.initializing || self.session_id.is_none()
    }

    /// Session controls are locked while any request is pending.
    pub fn sessions_locked(&self) -> bool {
        self.sending || self.initializing
    }

    /// Echo the user's query and mark the turn pending; returns its epoch.
    pub fn push_user(&mut self, query: impl Into<String>) -> u64 {
        self.messages.push(ChatMessage::user(query));
        self.sending = true;
        self.epoch
    }

    pub fn push_answer(&mut self, epoch: u64, response: ChatResponse) {
        if !self.is_current(epoch) {
            return;
        }
        self.messages.push(ChatMessage::ai(response.answer, response.sources));
        self.sending = false;
    }

    pub fn push_error(&mut self, epoch: u64, err: &ApiError) {
        if !self.is_current(epoch) {
            return;
        }
        self.messages
            .push(ChatMessage::ai(format!("⚠️ Sorry, I encountered an error: {err}"), Vec::new()));
        self.sending = false;
    }
}
