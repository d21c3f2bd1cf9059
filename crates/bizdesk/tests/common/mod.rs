//! Common test utilities and helpers
//!
//! Builds an app over a temporary filesystem store and issues tokens for
//! test identities.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
	Router,
	body::Body,
	http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use bizdesk::identity::{Role, UserIdentity};
use bizdesk::settings_adapter::{SettingsAdapter, SettingsRecord};
use bizdesk::{App, AppBuilder, routes};
use bizdesk_store_adapter_fs::StoreAdapterFs;

pub const TEST_SECRET: &str = "test secret";

pub struct TestApp {
	pub app: App,
	pub router: Router,
	pub store: Arc<StoreAdapterFs>,
	_temp: TempDir,
}

pub async fn setup(record: Option<SettingsRecord>) -> TestApp {
	let temp = TempDir::new().expect("Failed to create temp directory");
	let store = Arc::new(StoreAdapterFs::new(temp.path().into()).await.expect("store"));
	if let Some(record) = record {
		store.replace_settings(&record).await.expect("seed settings");
	}

	let mut builder = AppBuilder::new();
	builder.token_secret(TEST_SECRET).settings_adapter(store.clone()).chat_adapter(store.clone());
	let app = builder.build().expect("build app");
	let router = routes::init(app.clone());

	TestApp { app, router, store, _temp: temp }
}

pub fn user(id: &str, role: Option<Role>) -> UserIdentity {
	UserIdentity {
		id: id.into(),
		email: format!("{}@example.com", id).into(),
		role,
		display_name: id.into(),
	}
}

pub fn token_for(app: &App, identity: &UserIdentity) -> String {
	app.tokens.generate(identity, 3600).expect("token").to_string()
}

/// Sends a request and returns the status and the parsed JSON body
pub async fn send(
	router: &Router,
	method: &str,
	uri: &str,
	token: Option<&str>,
	body: Option<Value>,
) -> (StatusCode, Value) {
	let mut req = Request::builder().method(method).uri(uri);
	if let Some(token) = token {
		req = req.header("Authorization", format!("Bearer {}", token));
	}
	let req = match body {
		Some(body) => req
			.header("Content-Type", "application/json")
			.body(Body::from(body.to_string()))
			.expect("request"),
		None => req.body(Body::empty()).expect("request"),
	};

	let (status, _, json) = request(router, req).await;
	(status, json)
}

/// Sends a prepared request, returning status, headers and the parsed JSON body
pub async fn request(router: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
	let res = router.clone().oneshot(req).await.expect("response");
	let status = res.status();
	let headers = res.headers().clone();
	let bytes = res.into_body().collect().await.expect("body").to_bytes();
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).unwrap_or(Value::Null)
	};
	(status, headers, json)
}

// vim: ts=4
