use super::*;

fn user(role: Option<Role>) -> User {
    User { username: "sam@firm.law".to_owned(), role }
}

fn session(id: &str) -> ChatSession {
    ChatSession {
        id: id.to_owned(),
        name: NEW_SESSION_NAME.to_owned(),
        created_at: "2025-03-01T10:00:00".to_owned(),
        updated_at: "2025-03-01T10:00:00".to_owned(),
    }
}

fn citation(filename: &str) -> Citation {
    Citation {
        mongo_document_id: "d".to_owned(),
        filename: filename.to_owned(),
        matter_id: "m".to_owned(),
        sensitivity: "internal".to_owned(),
        chunk_index: 0,
        text_snippet: "snippet".to_owned(),
        score: 0.9,
    }
}

fn ready_state() -> ChatState {
    let mut state = ChatState::default();
    let epoch = state.begin_session();
    assert!(state.session_ready(epoch, session("s1"), "hi".to_owned()));
    state
}

// =============================================================
// Welcome messages
// =============================================================

#[test]
fn welcome_for_signed_out_visitor() {
    assert_eq!(welcome_message(None), SIGNED_OUT_WELCOME);
}

#[test]
fn welcome_is_tailored_by_role() {
    let partner = welcome_message(Some(&user(Some(Role::Partner))));
    assert!(partner.starts_with("Hello sam@firm.law, welcome back! As a partner"));

    let associate = welcome_message(Some(&user(Some(Role::Associate))));
    assert!(associate.contains("As an associate, you can access case documents"));

    let staff = welcome_message(Some(&user(Some(Role::Staff))));
    assert!(staff.contains("As staff, you have access to administrative functions"));

    let client = welcome_message(Some(&user(Some(Role::Client))));
    assert!(client.contains("thank you for using our legal services"));
}

#[test]
fn welcome_without_role_is_generic() {
    assert_eq!(
        welcome_message(Some(&user(None))),
        "Hello sam@firm.law, welcome! How can I assist you today?"
    );
}

// =============================================================
// Session lifecycle
// =============================================================

#[test]
fn chat_state_default_is_idle_and_empty() {
    let state = ChatState::default();
    assert!(state.messages.is_empty());
    assert!(state.session_id.is_none());
    assert!(!state.initializing);
    assert!(!state.sending);
    assert!(state.input_disabled());
}

#[test]
fn session_ready_greets_and_lists_session() {
    let state = ready_state();
    assert_eq!(state.session_id.as_deref(), Some("s1"));
    assert!(!state.initializing);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].role, MessageRole::Ai);
    assert_eq!(state.messages[0].content, "hi");
    assert_eq!(state.sessions.len(), 1);
    assert!(!state.input_disabled());
}

#[test]
fn session_failed_shows_single_error_bubble() {
    let mut state = ChatState::default();
    let epoch = state.begin_session();
    state.session_failed(epoch);
    assert!(state.session_id.is_none());
    assert!(!state.initializing);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].content, SESSION_ERROR);
}

#[test]
fn abort_session_stops_initializing() {
    let mut state = ChatState::default();
    state.begin_session();
    assert!(state.initializing);
    state.abort_session();
    assert!(!state.initializing);
    assert!(state.session_id.is_none());
}

#[test]
fn reset_clears_conversation_and_sessions() {
    let mut state = ready_state();
    state.push_user("q");
    state.reset();
    assert!(state.messages.is_empty());
    assert!(state.sessions.is_empty());
    assert!(state.session_id.is_none());
    assert!(!state.sending);
}

#[test]
fn set_sessions_keeps_active_session_listed() {
    let mut state = ready_state();
    let epoch = state.epoch;
    state.set_sessions(epoch, vec![session("older")]);
    let ids: Vec<_> = state.sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "older"]);

    state.set_sessions(epoch, vec![session("s1"), session("older")]);
    assert_eq!(state.sessions.len(), 2);
}

#[test]
fn history_loaded_replaces_messages_with_server_ids() {
    let mut state = ready_state();
    let epoch = state.begin_session();
    state.history_loaded(
        epoch,
        "s2".to_owned(),
        vec![
            Message {
                id: Some("m1".to_owned()),
                role: MessageRole::User,
                content: "q".to_owned(),
                citations: Vec::new(),
                created_at: None,
            },
            Message {
                id: None,
                role: MessageRole::Ai,
                content: "a".to_owned(),
                citations: vec![citation("lease.pdf")],
                created_at: None,
            },
        ],
    );
    assert_eq!(state.session_id.as_deref(), Some("s2"));
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[0].id, "m1");
    assert!(!state.messages[1].id.is_empty());
    assert_eq!(state.messages[1].citations[0].filename, "lease.pdf");
    assert!(!state.initializing);
}

// =============================================================
// Sending
// =============================================================

#[test]
fn can_send_requires_text_session_user_and_idle() {
    let state = ready_state();
    assert!(state.can_send("what is the term?", true));
    assert!(!state.can_send("   ", true));
    assert!(!state.can_send("what is the term?", false));

    let mut busy = ready_state();
    busy.push_user("first");
    assert!(!busy.can_send("second", true));

    let sessionless = ChatState::default();
    assert!(!sessionless.can_send("hello", true));
}

#[test]
fn push_user_appends_immediately_and_locks_input() {
    let mut state = ready_state();
    state.push_user("Who is the lessor?");
    assert!(state.sending);
    assert!(state.input_disabled());
    let last = state.messages.last().unwrap();
    assert_eq!(last.role, MessageRole::User);
    assert_eq!(last.content, "Who is the lessor?");
}

#[test]
fn push_answer_attaches_citations_and_unlocks() {
    let mut state = ready_state();
    let epoch = state.push_user("q");
    state.push_answer(epoch, ChatResponse { answer: "Acme Corp.".to_owned(), sources: vec![citation("lease.pdf")] });
    assert!(!state.sending);
    let last = state.messages.last().unwrap();
    assert_eq!(last.role, MessageRole::Ai);
    assert_eq!(last.content, "Acme Corp.");
    assert_eq!(last.citations.len(), 1);
}

#[test]
fn push_error_formats_inline_apology() {
    let mut state = ready_state();
    let epoch = state.push_user("q");
    state.push_error(epoch, &ApiError::Rejected { status: 500, detail: "Failed to save message".to_owned() });
    assert!(!state.sending);
    assert_eq!(
        state.messages.last().unwrap().content,
        "⚠️ Sorry, I encountered an error: Failed to save message"
    );
}

#[test]
fn local_messages_get_distinct_ids() {
    let a = ChatMessage::user("x");
    let b = ChatMessage::user("x");
    assert_ne!(a.id, b.id);
}

// =============================================================
// Late replies
// =============================================================

#[test]
fn answer_after_sign_out_does_not_reach_next_user() {
    let mut state = ready_state();
    let alice_turn = state.push_user("alice question");

    state.reset();
    let bob_open = state.begin_session();
    assert!(state.session_ready(bob_open, session("bob-session"), "Hello bob".to_owned()));
    let bob_turn = state.push_user("hello bob");

    state.push_answer(alice_turn, ChatResponse { answer: "ALICE PRIVILEGED ANSWER".to_owned(), sources: Vec::new() });
    state.push_error(alice_turn, &ApiError::MissingToken);

    let contents: Vec<_> = state.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Hello bob", "hello bob"]);
    assert!(state.sending);

    state.push_answer(bob_turn, ChatResponse { answer: "for bob".to_owned(), sources: Vec::new() });
    assert!(!state.sending);
    assert_eq!(state.messages.last().unwrap().content, "for bob");
}

#[test]
fn late_session_create_does_not_replace_newer_session() {
    let mut state = ChatState::default();
    let alice_open = state.begin_session();
    state.reset();
    let bob_open = state.begin_session();

    assert!(!state.session_ready(alice_open, session("alice-session"), "Hello alice".to_owned()));
    assert!(state.session_id.is_none());
    assert!(state.initializing);
    assert!(state.messages.is_empty());
    assert!(state.sessions.is_empty());

    state.session_failed(alice_open);
    assert!(state.messages.is_empty());

    assert!(state.session_ready(bob_open, session("bob-session"), "Hello bob".to_owned()));
    assert_eq!(state.session_id.as_deref(), Some("bob-session"));
}

#[test]
fn late_history_and_session_list_are_dropped_after_switch() {
    let mut state = ready_state();
    let first = state.begin_session();
    let second = state.begin_session();

    state.history_loaded(first, "old".to_owned(), Vec::new());
    assert!(state.session_id.is_none());
    assert!(state.initializing);

    state.set_sessions(first, vec![session("stale")]);
    assert!(state.sessions.iter().all(|s| s.id != "stale"));

    state.history_loaded(second, "new".to_owned(), Vec::new());
    assert_eq!(state.session_id.as_deref(), Some("new"));
}

#[test]
fn reset_keeps_advancing_epoch() {
    let mut state = ready_state();
    let before = state.epoch;
    state.reset();
    assert_ne!(state.epoch, before);
    assert_ne!(state.epoch, 0);
}

// =============================================================
// Rename and delete
// =============================================================

#[test]
fn session_renamed_updates_listed_entry_only() {
    let mut state = ready_state();
    let mut renamed = session("s1");
    renamed.name = "Lease review".to_owned();
    state.session_renamed(renamed);
    assert_eq!(state.sessions[0].name, "Lease review");

    state.session_renamed(session("unknown"));
    assert_eq!(state.sessions.len(), 1);
}

#[test]
fn session_deleted_reports_whether_it_was_active() {
    let mut state = ready_state();
    let epoch = state.epoch;
    state.set_sessions(epoch, vec![session("s1"), session("older")]);

    assert!(!state.session_deleted("older"));
    assert_eq!(state.sessions.len(), 1);

    assert!(state.session_deleted("s1"));
    assert!(state.sessions.is_empty());
}
