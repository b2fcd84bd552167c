//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `chat`, `document`, `layout`) so each
//! component depends on one small model provided through Leptos context.

pub mod auth;
pub mod chat;
pub mod document;
pub mod layout;
