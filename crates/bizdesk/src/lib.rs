//! Bizdesk is a small-business CRM backend.
//!
//! # Features
//!
//! - Role-based module visibility
//!     - closed role set: client, worker, administrator
//!     - per-module, per-action allow-lists stored with the settings
//!     - administrators are always allowed
//! - Settings snapshots per session, replace-on-save
//! - Private chat lookup between two users
//! - Pluggable stores (see the `bizdesk-store-adapter-fs` crate)

// Re-export shared types and adapter traits from bizdesk-types
pub use bizdesk_types::chat_adapter;
pub use bizdesk_types::error;
pub use bizdesk_types::identity;
pub use bizdesk_types::matrix;
pub use bizdesk_types::module;
pub use bizdesk_types::settings_adapter;
pub use bizdesk_types::types;

// Core re-exports
pub use bizdesk_core::auth;
pub use bizdesk_core::chat;
pub use bizdesk_core::perm;
pub use bizdesk_core::settings;

// Local modules
pub mod app;
pub mod prelude;
pub mod routes;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
