use axum::{
	Json, Router, middleware,
	routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::prelude::*;
use bizdesk_core::{
	app::VERSION,
	auth::{self, require_auth},
	chat,
	middleware::request_id,
	perm,
	settings,
};

async fn health() -> Json<Value> {
	Json(json!({ "status": "ok", "version": VERSION }))
}

pub fn init(app: App) -> Router {
	let protected_router = Router::new()
		.route("/api/permissions", get(perm::handler::get_permissions))
		.route("/api/permissions/{module}/{action}", get(perm::handler::check))
		.route("/api/modules", get(perm::handler::visible_modules))
		.route("/api/auth/logout", post(auth::logout))
		.route(
			"/api/settings",
			get(settings::handler::get_settings).put(settings::handler::update_settings),
		)
		.route("/api/settings/refresh", post(settings::handler::refresh_settings))
		.route("/api/chat/private", post(chat::handler::open_private))
		.route(
			"/api/chat/{id}/messages",
			get(chat::handler::list_messages).post(chat::handler::post_message),
		)
		.layer(middleware::from_fn_with_state(app.clone(), require_auth));

	let public_router = Router::new().route("/api/health", get(health));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.layer(middleware::from_fn(request_id))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(app)
}

// vim: ts=4
