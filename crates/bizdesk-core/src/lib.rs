//! Core services for the Bizdesk backend.
//!
//! - [`perm`]: the role/module/action permission evaluator and module gate
//! - [`settings`]: the settings snapshot service (fetch, refresh, replace-on-save)
//! - [`chat`]: private conversation lookup and message posting
//! - [`auth`]: session token verification middleware

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod auth;
pub mod chat;
pub mod middleware;
pub mod perm;
pub mod prelude;
pub mod settings;

pub use app::{App, AppState};
pub use perm::{PermissionContext, check_permission};

// vim: ts=4
