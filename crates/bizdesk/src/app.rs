//! App builder - constructs and runs the Bizdesk application

use std::sync::Arc;

use crate::prelude::*;
use crate::routes;
use bizdesk_core::app::{AppState, VERSION};
use bizdesk_core::auth::TokenKeys;
use bizdesk_core::chat::ChatService;
use bizdesk_core::settings::SettingsService;
use bizdesk_types::chat_adapter::ChatAdapter;
use bizdesk_types::settings_adapter::SettingsAdapter;

pub use bizdesk_core::app::App;

pub struct AppBuilderOpts {
	pub listen: Box<str>,
	pub token_secret: Option<Box<[u8]>>,
	pub settings_cache_size: usize,
}

#[derive(Default)]
struct Adapters {
	settings_adapter: Option<Arc<dyn SettingsAdapter>>,
	chat_adapter: Option<Arc<dyn ChatAdapter>>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed (tests, embedding apps)
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				token_secret: None,
				settings_cache_size: 1000,
			},
			adapters: Adapters::default(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn token_secret(&mut self, secret: impl AsRef<[u8]>) -> &mut Self {
		self.opts.token_secret = Some(secret.as_ref().into());
		self
	}
	pub fn settings_cache_size(&mut self, size: usize) -> &mut Self {
		self.opts.settings_cache_size = size;
		self
	}

	// Adapters
	pub fn settings_adapter(&mut self, settings_adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.adapters.settings_adapter = Some(settings_adapter);
		self
	}
	pub fn chat_adapter(&mut self, chat_adapter: Arc<dyn ChatAdapter>) -> &mut Self {
		self.adapters.chat_adapter = Some(chat_adapter);
		self
	}

	/// Assembles the shared state without starting a listener
	pub fn build(self) -> BdResult<App> {
		let Some(settings_adapter) = self.adapters.settings_adapter else {
			error!("FATAL: No settings adapter configured");
			return Err(Error::ConfigError("No settings adapter configured".into()));
		};
		let Some(chat_adapter) = self.adapters.chat_adapter else {
			error!("FATAL: No chat adapter configured");
			return Err(Error::ConfigError("No chat adapter configured".into()));
		};
		let Some(token_secret) = self.opts.token_secret.filter(|s| !s.is_empty()) else {
			error!("FATAL: No token secret configured");
			return Err(Error::ConfigError("No token secret configured".into()));
		};

		Ok(Arc::new(AppState {
			settings: SettingsService::new(settings_adapter, self.opts.settings_cache_size),
			chat: ChatService::new(chat_adapter),
			tokens: TokenKeys::from_secret(&token_secret),
		}))
	}

	pub async fn run(self) -> BdResult<()> {
		info!("Bizdesk V{}", VERSION);

		let listen = self.opts.listen.clone();
		let app = self.build()?;
		let router = routes::init(app);

		let listener = tokio::net::TcpListener::bind(listen.as_ref()).await?;
		info!("Listening on {}", listen);

		axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
		info!("Shut down");
		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		warn!("Failed to listen for shutdown signal: {}", err);
	}
}

// vim: ts=4
