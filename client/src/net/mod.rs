//! Networking modules for the Lexi REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP round-trips, `error` turns failures into the text
//! the UI shows inline, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod types;
