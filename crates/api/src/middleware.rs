use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use restock_core::SessionId;

use crate::context::SessionContext;

/// Request/response header carrying the session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Resolve the caller's session and echo its id on the response.
///
/// A missing or malformed header starts a new session.
pub async fn session_middleware(mut req: Request<Body>, next: Next) -> Response {
    let ctx = match extract_session_id(req.headers()) {
        Some(id) => SessionContext::existing(id),
        None => SessionContext::fresh(),
    };

    if ctx.is_new() {
        tracing::debug!(session_id = %ctx.session_id(), "starting new session");
    }

    req.extensions_mut().insert(ctx);

    let mut res = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&ctx.session_id().to_string()) {
        res.headers_mut().insert(SESSION_HEADER, value);
    }
    res
}

fn extract_session_id(headers: &HeaderMap) -> Option<SessionId> {
    let raw = headers.get(SESSION_HEADER)?.to_str().ok()?;
    raw.parse().ok()
}
