//! Shared application state

use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::chat::ChatService;
use crate::settings::SettingsService;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub settings: SettingsService,
	pub chat: ChatService,
	pub tokens: TokenKeys,
}

pub type App = Arc<AppState>;

// vim: ts=4
