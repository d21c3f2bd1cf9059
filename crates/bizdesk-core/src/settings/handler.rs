//! Settings handlers

use axum::{
	Json,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
};

use crate::prelude::*;
use bizdesk_types::extract::{Auth, OptionalRequestId};
use bizdesk_types::settings_adapter::SettingsRecord;
use bizdesk_types::types::ApiResponse;

/// GET /api/settings - Settings record for the caller's session
///
/// Every authenticated user can read it; the front end derives module
/// visibility from it.
pub async fn get_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> BdResult<(StatusCode, Json<ApiResponse<SettingsRecord>>)> {
	let snapshot = app.settings.load_for(&auth.id).await?;
	let response = ApiResponse::new(snapshot.record.clone()).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

/// PUT /api/settings - Replace the whole settings record
pub async fn update_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	record: Result<Json<SettingsRecord>, JsonRejection>,
) -> BdResult<(StatusCode, Json<ApiResponse<SettingsRecord>>)> {
	let Json(record) = record?;
	let snapshot = app.settings.save(&auth, record).await?;
	info!("User {} replaced the settings record", auth.id);

	let response = ApiResponse::new(snapshot.record.clone()).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

/// POST /api/settings/refresh - Refetch the record from the store
pub async fn refresh_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> BdResult<(StatusCode, Json<ApiResponse<SettingsRecord>>)> {
	let snapshot = app.settings.refresh(&auth.id).await?;
	let response = ApiResponse::new(snapshot.record.clone()).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
