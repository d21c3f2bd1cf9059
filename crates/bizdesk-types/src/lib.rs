//! Shared types, adapter traits, and core utilities for the Bizdesk backend.
//!
//! This crate holds everything the store adapters and the service crates agree
//! on: the role and module vocabulary, the permission matrix, the settings
//! record, the chat records, and the error type.

pub mod chat_adapter;
pub mod error;
pub mod extract;
pub mod identity;
pub mod matrix;
pub mod module;
pub mod prelude;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
