//! # lexi-client
//!
//! Leptos + WASM frontend for the Lexi legal workspace.
//!
//! The workspace is a split view: an authentication header on top, the case
//! assistant chat on the left and a document viewer on the right. All domain
//! work (auth, retrieval, answer generation) happens in the remote API; this
//! crate only holds presentation state and the REST calls that feed it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
