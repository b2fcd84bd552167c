//! Bearer token persistence in browser `localStorage`.
//!
//! The token is the only state that survives a reload. SSR paths no-op so
//! server rendering always starts signed out.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "lexi_token";

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the stored token, treating an empty value as absent.
pub fn load_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let raw = storage()?.get_item(TOKEN_KEY).ok().flatten()?;
        non_empty(raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist `token` for later sessions.
pub fn store_token(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

/// Forget the stored token.
pub fn clear_token() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn non_empty(raw: String) -> Option<String> {
    if raw.trim().is_empty() { None } else { Some(raw) }
}
