//! Case assistant panel: session bootstrap, message list, and query input.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opens a backend chat session whenever a new user signs in, then runs one
//! `POST /chat` round-trip per query. At most one request is pending; the
//! input stays locked until it settles.

#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod chat_panel_test;

use leptos::prelude::*;

use crate::components::citation_card::CitationList;
use crate::net::types::{ChatSession, MessageRole, User, role_label};
use crate::state::auth::AuthState;
use crate::state::chat::{ChatMessage, ChatState, SIGNED_OUT_WELCOME};
use crate::util::markdown::render_markdown_html;

/// Picker label: session name plus the day it was last used.
fn session_label(session: &ChatSession) -> String {
    let day: String = session.updated_at.chars().take(10).collect();
    if day.is_empty() { session.name.clone() } else { format!("{} · {day}", session.name) }
}

/// Picker entries as `(id, label, selected)`; the active session is selected.
fn session_options(state: &ChatState) -> Vec<(String, String, bool)> {
    state
        .sessions
        .iter()
        .map(|s| (s.id.clone(), session_label(s), state.session_id.as_deref() == Some(s.id.as_str())))
        .collect()
}

/// A usable session name from the rename field, if any.
fn rename_target(draft: &str) -> Option<String> {
    let name = draft.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

/// Create a fresh session for `user` and greet them in it.
fn open_new_session(chat: RwSignal<ChatState>, user: User) {
    let mut epoch = 0;
    chat.update(|c| epoch = c.begin_session());
    let Some(token) = crate::util::token::load_token() else {
        chat.update(ChatState::abort_session);
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::create_session(&token, crate::state::chat::NEW_SESSION_NAME).await {
            Ok(session) => {
                let welcome = crate::state::chat::welcome_message(Some(&user));
                let mut opened = false;
                chat.update(|c| opened = c.session_ready(epoch, session, welcome));
                if opened {
                    refresh_sessions(chat, &token, epoch).await;
                }
            }
            Err(e) => {
                log::warn!("session create failed: {e}");
                chat.update(|c| c.session_failed(epoch));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (token, user, epoch);
}

/// Switch to a stored session and load its history.
fn open_history(chat: RwSignal<ChatState>, session_id: String) {
    let Some(token) = crate::util::token::load_token() else {
        return;
    };
    let mut epoch = 0;
    chat.update(|c| epoch = c.begin_session());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_session_messages(&token, &session_id).await {
            Ok(history) => chat.update(|c| c.history_loaded(epoch, session_id, history)),
            Err(e) => {
                log::warn!("history load failed for {session_id}: {e}");
                chat.update(|c| c.session_failed(epoch));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (token, session_id, epoch);
}

#[cfg(feature = "hydrate")]
async fn refresh_sessions(chat: RwSignal<ChatState>, token: &str, epoch: u64) {
    match crate::net::api::list_sessions(token).await {
        Ok(sessions) => chat.update(|c| c.set_sessions(epoch, sessions)),
        Err(e) => log::warn!("session list failed: {e}"),
    }
}

/// Rename `session_id` on the backend and update its picker entry.
fn rename_active(chat: RwSignal<ChatState>, session_id: String, name: String) {
    let Some(token) = crate::util::token::load_token() else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::rename_session(&token, &session_id, &name).await {
            Ok(session) => chat.update(|c| c.session_renamed(session)),
            Err(e) => log::warn!("session rename failed for {session_id}: {e}"),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (token, chat, session_id, name);
}

/// Delete `session_id`; if it was open, start a new one for `auth`'s user.
fn delete_active(chat: RwSignal<ChatState>, auth: RwSignal<AuthState>, session_id: String) {
    let Some(token) = crate::util::token::load_token() else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::delete_session(&token, &session_id).await {
            Ok(()) => {
                let mut was_active = false;
                chat.update(|c| was_active = c.session_deleted(&session_id));
                if was_active {
                    if let Some(user) = auth.get_untracked().user {
                        open_new_session(chat, user);
                    }
                }
            }
            Err(e) => log::warn!("session delete failed for {session_id}: {e}"),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (token, chat, auth, session_id);
}

#[cfg(feature = "hydrate")]
fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message("Delete this chat and all its messages?").ok())
        .unwrap_or(false)
}

/// Chat column of the workspace.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = expect_context::<RwSignal<ChatState>>();

    let input = RwSignal::new(String::new());
    let rename_draft = RwSignal::new(None::<String>);
    let last_user = RwSignal::new(None::<String>);
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // One session per distinct sign-in; signing out drops the conversation.
    Effect::new(move || {
        let user = auth.with(|a| a.user.clone());
        match user {
            None => {
                if last_user.get_untracked().is_some() {
                    last_user.set(None);
                    chat.update(ChatState::reset);
                    input.set(String::new());
                    rename_draft.set(None);
                }
            }
            Some(user) => {
                if last_user.get_untracked().as_deref() == Some(user.username.as_str()) {
                    return;
                }
                last_user.set(Some(user.username.clone()));
                open_new_session(chat, user);
            }
        }
    });

    Effect::new(move || {
        let _ = chat.with(|c| (c.messages.len(), c.sending, c.initializing));

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let do_send = move || {
        let text = input.get_untracked();
        let signed_in = auth.with_untracked(AuthState::is_connected);
        if !chat.with_untracked(|c| c.can_send(&text, signed_in)) {
            return;
        }
        let Some(session_id) = chat.with_untracked(|c| c.session_id.clone()) else {
            return;
        };
        input.set(String::new());
        let mut epoch = 0;
        chat.update(|c| epoch = c.push_user(text.clone()));

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match crate::util::token::load_token() {
                Some(token) => crate::net::api::send_chat(&token, &session_id, &text).await,
                None => Err(crate::net::error::ApiError::MissingToken),
            };
            match result {
                Ok(response) => chat.update(|c| c.push_answer(epoch, response)),
                Err(e) => {
                    log::warn!("chat turn failed: {e}");
                    chat.update(|c| c.push_error(epoch, &e));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (session_id, epoch);
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            do_send();
        }
    };

    let on_new_chat = move |_| {
        if chat.with_untracked(ChatState::sessions_locked) {
            return;
        }
        rename_draft.set(None);
        if let Some(user) = auth.get_untracked().user {
            open_new_session(chat, user);
        }
    };

    let on_pick_session = move |ev: leptos::ev::Event| {
        let picked = event_target_value(&ev);
        let current = chat.with_untracked(|c| c.session_id.clone());
        if picked.is_empty() || current.as_deref() == Some(picked.as_str()) {
            return;
        }
        rename_draft.set(None);
        open_history(chat, picked);
    };

    let on_start_rename = move |_| {
        let name = chat.with_untracked(|c| {
            let id = c.session_id.as_deref()?;
            c.sessions.iter().find(|s| s.id == id).map(|s| s.name.clone())
        });
        rename_draft.set(Some(name.unwrap_or_default()));
    };

    let commit_rename = move || {
        let Some(name) = rename_draft.with_untracked(|d| d.as_deref().and_then(rename_target)) else {
            return;
        };
        rename_draft.set(None);
        if let Some(session_id) = chat.with_untracked(|c| c.session_id.clone()) {
            rename_active(chat, session_id, name);
        }
    };

    let on_rename_keydown = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            commit_rename();
        }
        "Escape" => rename_draft.set(None),
        _ => {}
    };

    let on_delete = move |_| {
        if chat.with_untracked(ChatState::sessions_locked) {
            return;
        }
        let Some(session_id) = chat.with_untracked(|c| c.session_id.clone()) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            if !confirm_delete() {
                return;
            }
        }
        rename_draft.set(None);
        delete_active(chat, auth, session_id);
    };

    let connected = move || auth.with(AuthState::is_connected);
    let locked = move || chat.with(ChatState::input_disabled);
    let sessions_locked = move || chat.with(ChatState::sessions_locked);
    let no_session = move || chat.with(|c| c.sessions_locked() || c.session_id.is_none());
    let subtitle = move || {
        let role = auth.with(|a| a.user.as_ref().and_then(|u| u.role));
        format!("Ask questions about the open file. ({})", role_label(role))
    };

    let signed_out = move || {
        view! {
            <div class="chat-panel">
                <div class="chat-panel__header">
                    <h2 class="chat-panel__title">"Case Assistant"</h2>
                    <p class="chat-panel__subtitle">"Please log in to start chatting."</p>
                </div>
                <div class="chat-panel__messages">
                    <div class="chat-row chat-row--ai">
                        <div class="chat-bubble chat-bubble--ai">{SIGNED_OUT_WELCOME}</div>
                    </div>
                </div>
            </div>
        }
    };

    let initializing_bubble = || {
        view! {
            <div class="chat-row chat-row--ai">
                <div class="chat-bubble chat-bubble--pending">"Initializing chat session..."</div>
            </div>
        }
    };

    view! {
        <Show when=connected fallback=signed_out>
            <div class="chat-panel">
                <div class="chat-panel__header">
                    <div class="chat-panel__heading">
                        <h2 class="chat-panel__title">"Case Assistant"</h2>
                        <p class="chat-panel__subtitle">{subtitle}</p>
                    </div>
                    <div class="chat-panel__sessions">
                        <Show
                            when=move || rename_draft.with(Option::is_some)
                            fallback=move || {
                                view! {
                                    <select
                                        class="chat-panel__session-picker"
                                        aria-label="Chat sessions"
                                        disabled=sessions_locked
                                        on:change=on_pick_session
                                    >
                                        {move || {
                                            chat.with(session_options)
                                                .into_iter()
                                                .map(|(id, label, selected)| {
                                                    view! { <option value=id selected=selected>{label}</option> }
                                                })
                                                .collect::<Vec<_>>()
                                        }}
                                    </select>
                                    <button class="btn btn--secondary" disabled=no_session on:click=on_start_rename>
                                        "Rename"
                                    </button>
                                    <button class="btn btn--secondary btn--danger" disabled=no_session on:click=on_delete>
                                        "Delete"
                                    </button>
                                }
                            }
                        >
                            <input
                                class="chat-panel__rename"
                                type="text"
                                aria-label="Session name"
                                prop:value=move || rename_draft.get().unwrap_or_default()
                                on:input=move |ev| rename_draft.set(Some(event_target_value(&ev)))
                                on:keydown=on_rename_keydown
                            />
                            <button class="btn btn--primary" on:click=move |_| commit_rename()>
                                "Save"
                            </button>
                            <button class="btn btn--secondary" on:click=move |_| rename_draft.set(None)>
                                "Cancel"
                            </button>
                        </Show>
                        <button class="btn btn--secondary" disabled=sessions_locked on:click=on_new_chat>
                            "New Chat"
                        </button>
                    </div>
                </div>

                <div class="chat-panel__messages" node_ref=messages_ref>
                    <Show when=move || !chat.with(|c| c.initializing) fallback=initializing_bubble>
                        <For
                            each=move || chat.with(|c| c.messages.clone())
                            key=|msg| msg.id.clone()
                            children=move |msg| view! { <MessageBubble msg=msg/> }
                        />
                    </Show>
                    {move || {
                        chat.with(|c| c.sending)
                            .then(|| {
                                view! {
                                    <div class="chat-row chat-row--ai">
                                        <div class="chat-bubble chat-bubble--pending">"Lexi is researching..."</div>
                                    </div>
                                }
                            })
                    }}
                </div>

                <div class="chat-panel__input-row">
                    <input
                        class="chat-panel__input"
                        type="text"
                        placeholder="Type your question..."
                        disabled=locked
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <button class="btn btn--primary chat-panel__send" disabled=locked on:click=move |_| do_send()>
                        "SEND"
                    </button>
                </div>
            </div>
        </Show>
    }
}

/// One chat bubble; assistant text is rendered as sanitized Markdown.
#[component]
fn MessageBubble(msg: ChatMessage) -> impl IntoView {
    let is_user = msg.role == MessageRole::User;
    let is_ai = !is_user;
    let body = if is_user {
        view! { <div class="chat-bubble__text">{msg.content}</div> }.into_any()
    } else {
        let rendered = render_markdown_html(&msg.content);
        view! { <div class="chat-bubble__text chat-bubble__markdown" inner_html=rendered></div> }.into_any()
    };

    view! {
        <div class="chat-row" class:chat-row--user=is_user class:chat-row--ai=is_ai>
            <div class="chat-bubble" class:chat-bubble--user=is_user class:chat-bubble--ai=is_ai>
                {body}
                <CitationList citations=msg.citations/>
            </div>
        </div>
    }
}
