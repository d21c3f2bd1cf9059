use std::{env, path::PathBuf, sync::Arc};

use bizdesk::prelude::*;
use bizdesk::AppBuilder;
use bizdesk_store_adapter_fs::StoreAdapterFs;

pub struct Config {
	pub listen: String,
	pub data_dir: PathBuf,
	pub token_secret: Option<String>,
	pub settings_cache_size: Option<usize>,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			data_dir: PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string())),
			token_secret: env::var("JWT_SECRET").ok(),
			settings_cache_size: env::var("SETTINGS_CACHE_SIZE").ok().and_then(|s| s.parse().ok()),
		}
	}
}

#[tokio::main]
async fn main() -> BdResult<()> {
	let config = Config::from_env();

	let mut builder = AppBuilder::new();
	let store = Arc::new(StoreAdapterFs::new(config.data_dir.into()).await?);

	builder.listen(config.listen).settings_adapter(store.clone()).chat_adapter(store);
	if let Some(secret) = config.token_secret {
		builder.token_secret(secret);
	} else {
		warn!("JWT_SECRET is not set");
	}
	if let Some(size) = config.settings_cache_size {
		builder.settings_cache_size(size);
	}

	builder.run().await
}

// vim: ts=4
