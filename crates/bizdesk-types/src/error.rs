//! Error type shared by all Bizdesk crates.

use axum::{
	Json,
	extract::rejection::{JsonRejection, QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde::Serialize;

pub type BdResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	ValidationError(String),
	ConfigError(String),

	// externals
	Io(std::io::Error),
	Json(serde_json::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err)
	}
}

impl From<JsonRejection> for Error {
	fn from(rejection: JsonRejection) -> Self {
		Self::ValidationError(rejection.body_text())
	}
}

impl From<QueryRejection> for Error {
	fn from(rejection: QueryRejection) -> Self {
		Self::ValidationError(rejection.body_text())
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			Error::Json(err) => write!(f, "json error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			Error::Json(err) => Some(err),
			_ => None,
		}
	}
}

#[derive(Serialize)]
struct ErrorBody {
	code: &'static str,
	message: String,
}

impl Error {
	fn status(&self) -> (StatusCode, &'static str) {
		match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "E-NOTFOUND"),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "E-PERM"),
			Error::Unauthorized => (StatusCode::UNAUTHORIZED, "E-AUTH"),
			Error::ValidationError(_) | Error::Json(_) => {
				(StatusCode::BAD_REQUEST, "E-VALIDATION")
			}
			Error::ConfigError(_) | Error::Io(_) => {
				(StatusCode::INTERNAL_SERVER_ERROR, "E-INTERNAL")
			}
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let (status, code) = self.status();
		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
			// Internal details stay in the log
			return (status, Json(ErrorBody { code, message: "internal error".into() }))
				.into_response();
		}
		(status, Json(ErrorBody { code, message: self.to_string() })).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_mapping() {
		assert_eq!(Error::NotFound.status().0, StatusCode::NOT_FOUND);
		assert_eq!(Error::PermissionDenied.status().0, StatusCode::FORBIDDEN);
		assert_eq!(Error::Unauthorized.status().0, StatusCode::UNAUTHORIZED);
		assert_eq!(Error::ValidationError("x".into()).status().0, StatusCode::BAD_REQUEST);
		assert_eq!(
			Error::Io(std::io::Error::other("disk")).status().0,
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}

	#[test]
	fn test_display() {
		assert_eq!(Error::ValidationError("bad role".into()).to_string(), "validation error: bad role");
	}
}

// vim: ts=4
