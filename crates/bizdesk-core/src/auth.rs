//! Session token verification and auth middleware
//!
//! Tokens are HS256 JWTs issued by the external auth provider. Only the
//! identity claims are read; the role claim is mapped onto the closed role set
//! and anything else becomes "no role".

use axum::{
	body::Body,
	extract::{Request, State},
	http::{Response, StatusCode},
	middleware::Next,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use bizdesk_types::extract::Auth;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessToken {
	pub sub: Box<str>,
	pub email: Box<str>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<Box<str>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<Box<str>>,
	pub exp: u64,
}

/// Keys for verifying (and, for tooling, issuing) session tokens
pub struct TokenKeys {
	decoding: DecodingKey,
	encoding: EncodingKey,
}

impl TokenKeys {
	pub fn from_secret(secret: &[u8]) -> Self {
		Self {
			decoding: DecodingKey::from_secret(secret),
			encoding: EncodingKey::from_secret(secret),
		}
	}

	pub fn validate(&self, token: &str) -> BdResult<UserIdentity> {
		let token_data =
			decode::<AccessToken>(token, &self.decoding, &Validation::new(Algorithm::HS256))
				.map_err(|err| {
					debug!("Token rejected: {}", err);
					Error::Unauthorized
				})?;
		let claims = token_data.claims;

		let role = claims.role.as_deref().and_then(Role::parse);
		if role.is_none() {
			warn!(user_id = %claims.sub, role = ?claims.role, "Token carries no known role");
		}

		Ok(UserIdentity {
			display_name: claims.name.unwrap_or_else(|| claims.email.clone()),
			id: claims.sub,
			email: claims.email,
			role,
		})
	}

	/// Issues a token for an identity, valid for `ttl_secs`
	pub fn generate(&self, identity: &UserIdentity, ttl_secs: u64) -> BdResult<Box<str>> {
		let now = u64::try_from(Timestamp::now().0).unwrap_or_default();
		let claims = AccessToken {
			sub: identity.id.clone(),
			email: identity.email.clone(),
			role: identity.role.map(|r| r.as_str().into()),
			name: Some(identity.display_name.clone()),
			exp: now + ttl_secs,
		};
		let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
			.map_err(|err| Error::ConfigError(format!("token encoding failed: {}", err)))?;
		Ok(token.into())
	}
}

fn bearer_token(req: &Request) -> Option<&str> {
	req.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request,
	next: Next,
) -> BdResult<Response<Body>> {
	let token = bearer_token(&req).ok_or(Error::Unauthorized)?;
	let identity = app.tokens.validate(token)?;

	req.extensions_mut().insert(Auth(identity));

	Ok(next.run(req).await)
}

/// POST /api/auth/logout - Drop the caller's settings snapshot
///
/// The token itself stays valid until it expires; the next request loads a
/// fresh snapshot.
pub async fn logout(State(app): State<App>, Auth(auth): Auth) -> StatusCode {
	app.settings.clear(&auth.id);
	info!(user_id = %auth.id, "Signed out");
	StatusCode::NO_CONTENT
}


// vim: ts=4
