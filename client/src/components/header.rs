//! Workspace header with connection status and the login form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The header owns the whole auth lifecycle: it restores a stored session on
//! mount, exchanges credentials for a token, and signs out. The rest of the
//! workspace only reacts to `AuthState.user`.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use leptos::prelude::*;

use crate::net::types::role_label;
use crate::state::auth::AuthState;

const MISSING_CREDENTIALS: &str = "Please enter both username and password";

/// Reject empty fields before any request is made.
fn validate_credentials(username: &str, password: &str) -> Result<(String, String), &'static str> {
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Log in, persist the token, then resolve the profile it belongs to.
#[cfg(feature = "hydrate")]
async fn connect(username: &str, password: &str) -> Result<crate::net::types::User, crate::net::error::ApiError> {
    let token = crate::net::api::login(username, password).await?;
    crate::util::token::store_token(&token);
    match crate::net::api::fetch_me(&token).await {
        Ok(user) => Ok(user),
        Err(e) => {
            crate::util::token::clear_token();
            Err(e)
        }
    }
}

/// Top bar: logo, status light, and either the login form or the signed-in user.
#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    // Restore a stored session once on mount; a rejected token is dropped silently.
    Effect::new(move || {
        if auth.with_untracked(|a| a.user.is_some()) {
            return;
        }
        let Some(token) = crate::util::token::load_token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_me(&token).await {
                Ok(user) => auth.update(|a| a.signed_in(user)),
                Err(e) => {
                    log::info!("stored token rejected: {e}");
                    crate::util::token::clear_token();
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    });

    let do_connect = move || {
        if auth.with_untracked(|a| a.loading) {
            return;
        }
        let (user_value, pass_value) = match validate_credentials(&username.get(), &password.get()) {
            Ok(pair) => pair,
            Err(msg) => {
                auth.update(|a| a.failed(msg));
                return;
            }
        };
        auth.update(AuthState::begin);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match connect(&user_value, &pass_value).await {
                Ok(user) => {
                    auth.update(|a| a.signed_in(user));
                    username.set(String::new());
                    password.set(String::new());
                }
                Err(e) => {
                    log::warn!("login failed: {e}");
                    auth.update(|a| a.failed(e.to_string()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (user_value, pass_value);
    };

    let on_disconnect = move |_| {
        if let Some(token) = crate::util::token::load_token() {
            leptos::task::spawn_local(async move {
                crate::net::api::logout(&token).await;
            });
        }
        crate::util::token::clear_token();
        auth.update(AuthState::signed_out);
        username.set(String::new());
        password.set(String::new());
    };

    let connected = move || auth.with(AuthState::is_connected);
    let busy = move || auth.with(|a| a.loading);

    let login_form = move || {
        view! {
            <div class="app-header__login">
                {move || {
                    auth.get()
                        .error
                        .map(|err| view! { <span class="app-header__error">{err}</span> })
                }}
                <input
                    class="app-header__input"
                    type="text"
                    placeholder="Username"
                    disabled=busy
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    class="app-header__input"
                    type="password"
                    placeholder="Password"
                    disabled=busy
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            do_connect();
                        }
                    }
                />
                <button
                    class="btn btn--primary"
                    class:btn--busy=busy
                    disabled=busy
                    on:click=move |_| do_connect()
                >
                    {move || if busy() { "..." } else { "Connect" }}
                </button>
            </div>
        }
    };

    view! {
        <header class="app-header">
            <div class="app-header__logo">
                "LEXI-RAG "
                <span class="app-header__tagline">"| Legal Workspace"</span>
            </div>

            <div class="app-header__credentials">
                <div class="app-header__status">
                    <span class="app-header__status-label">"Status:"</span>
                    <div class="status-dot" class:status-dot--online=connected></div>
                </div>

                <Show when=connected fallback=login_form>
                    <div class="app-header__user">
                        <span class="app-header__username">
                            {move || auth.get().user.map(|u| u.username).unwrap_or_default()}
                        </span>
                        <span class="app-header__role">
                            {move || format!("({})", role_label(auth.get().user.and_then(|u| u.role)))}
                        </span>
                        <button class="btn btn--secondary" on:click=on_disconnect>
                            "Disconnect"
                        </button>
                    </div>
                </Show>
            </div>
        </header>
    }
}
