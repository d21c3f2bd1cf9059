//! Settings subsystem: snapshot service and HTTP handlers
//!
//! The settings record lives in an external store. [`service::SettingsService`]
//! is the only component that reads or writes it; everything else works on the
//! immutable snapshots it hands out.

pub mod handler;
pub mod service;

pub use service::{SettingsCache, SettingsService, SettingsSnapshot};

// vim: ts=4
