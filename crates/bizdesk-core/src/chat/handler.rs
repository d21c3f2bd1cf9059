//! Chat handlers

use axum::{
	Json,
	extract::{Path, State, rejection::JsonRejection},
	http::StatusCode,
};
use serde::Deserialize;

use crate::prelude::*;
use bizdesk_types::chat_adapter::{ChatMessage, Conversation};
use bizdesk_types::extract::{Auth, OptionalRequestId};
use bizdesk_types::types::ApiResponse;

#[derive(Deserialize)]
pub struct OpenPrivateRequest {
	pub peer: String,
}

#[derive(Deserialize)]
pub struct PostMessageRequest {
	pub body: String,
}

/// POST /api/chat/private - Find or create the private conversation with a peer
pub async fn open_private(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	req: Result<Json<OpenPrivateRequest>, JsonRejection>,
) -> BdResult<(StatusCode, Json<ApiResponse<Conversation>>)> {
	let Json(req) = req?;
	let snapshot = app.settings.load_for(&auth.id).await?;
	let perms = snapshot.permissions(auth.role);
	let conversation = app.chat.open_private(&perms, &auth, &req.peer).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(conversation).with_req_id(req_id))))
}

/// GET /api/chat/{id}/messages
pub async fn list_messages(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(conversation_id): Path<String>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> BdResult<(StatusCode, Json<ApiResponse<Vec<ChatMessage>>>)> {
	let snapshot = app.settings.load_for(&auth.id).await?;
	let perms = snapshot.permissions(auth.role);
	let messages = app.chat.messages(&perms, &auth, &conversation_id).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(messages).with_req_id(req_id))))
}

/// POST /api/chat/{id}/messages
pub async fn post_message(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(conversation_id): Path<String>,
	OptionalRequestId(req_id): OptionalRequestId,
	req: Result<Json<PostMessageRequest>, JsonRejection>,
) -> BdResult<(StatusCode, Json<ApiResponse<ChatMessage>>)> {
	let Json(req) = req?;
	let snapshot = app.settings.load_for(&auth.id).await?;
	let perms = snapshot.permissions(auth.role);
	let message = app.chat.post_message(&perms, &auth, &conversation_id, &req.body).await?;

	Ok((StatusCode::CREATED, Json(ApiResponse::new(message).with_req_id(req_id))))
}

// vim: ts=4
