//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the workspace panes while reading/writing shared state
//! from Leptos context providers.

pub mod chat_panel;
pub mod citation_card;
pub mod document_viewer;
pub mod header;
