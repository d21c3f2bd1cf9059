//! Permission query handlers

use axum::{
	Json,
	extract::{Path, Query, State, rejection::QueryRejection},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::{ModuleCapabilities, ModuleGate};
use crate::prelude::*;
use bizdesk_types::extract::{Auth, OptionalRequestId};
use bizdesk_types::types::ApiResponse;

#[derive(Serialize)]
pub struct PermissionsResponse {
	pub role: Option<Role>,
	pub modules: Vec<ModuleCapabilities>,
}

#[derive(Serialize)]
pub struct CheckResponse {
	pub allowed: bool,
}

#[derive(Deserialize)]
pub struct VisibleModulesQuery {
	pub gate: Option<ModuleGate>,
}

#[derive(Serialize)]
pub struct VisibleModulesResponse {
	pub gate: ModuleGate,
	pub modules: Vec<ModuleName>,
}

/// GET /api/permissions - Role and allowed actions of the caller
pub async fn get_permissions(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> BdResult<(StatusCode, Json<ApiResponse<PermissionsResponse>>)> {
	let snapshot = app.settings.load_for(&auth.id).await?;
	let modules = snapshot.permissions(auth.role).capabilities();

	let response =
		ApiResponse::new(PermissionsResponse { role: auth.role, modules }).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

/// GET /api/permissions/{module}/{action} - Single permission check
///
/// Module and action are taken verbatim; unknown names are simply denied
/// for non-administrators.
pub async fn check(
	State(app): State<App>,
	Auth(auth): Auth,
	Path((module, action)): Path<(String, String)>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> BdResult<(StatusCode, Json<ApiResponse<CheckResponse>>)> {
	let snapshot = app.settings.load_for(&auth.id).await?;
	let allowed = snapshot.permissions(auth.role).check_permission(&module, &action);
	debug!(user_id = %auth.id, module = %module, action = %action, allowed, "Permission check");

	let response = ApiResponse::new(CheckResponse { allowed }).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

/// GET /api/modules?gate=flag|matrix|both - Modules shown to the caller
///
/// The gate is required; flags and matrix disagree on some modules and the
/// caller decides which one counts.
pub async fn visible_modules(
	State(app): State<App>,
	Auth(auth): Auth,
	query: Result<Query<VisibleModulesQuery>, QueryRejection>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> BdResult<(StatusCode, Json<ApiResponse<VisibleModulesResponse>>)> {
	let Query(query) = query?;
	let Some(gate) = query.gate else {
		return Err(Error::ValidationError("gate is required: flag, matrix or both".into()));
	};
	let snapshot = app.settings.load_for(&auth.id).await?;
	let modules = ModuleName::ALL
		.into_iter()
		.filter(|module| gate.is_open(Some(&snapshot.record), auth.role, *module))
		.collect();

	let response = ApiResponse::new(VisibleModulesResponse { gate, modules }).with_req_id(req_id);
	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
