//! Request-level middleware

use axum::{
	body::Body,
	extract::Request,
	http::{HeaderValue, Response},
	middleware::Next,
};

use bizdesk_types::extract::RequestId;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request with an id, reusing the client's `X-Request-Id` if present
pub async fn request_id(mut req: Request, next: Next) -> Response<Body> {
	let req_id = req
		.headers()
		.get(REQUEST_ID_HEADER)
		.and_then(|h| h.to_str().ok())
		.filter(|h| !h.is_empty() && h.len() <= 64)
		.map_or_else(|| uuid::Uuid::new_v4().to_string(), ToString::to_string);

	req.extensions_mut().insert(RequestId(req_id.clone()));
	let mut res = next.run(req).await;
	if let Ok(value) = HeaderValue::from_str(&req_id) {
		res.headers_mut().insert(REQUEST_ID_HEADER, value);
	}
	res
}

// vim: ts=4
