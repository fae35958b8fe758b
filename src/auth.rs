use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::{AppState, error::AppError};

pub const SESSION_COOKIE: &str = "session";

/// Lets a request through to `/api` only if it carries a configured token, either as
/// `Authorization: Bearer <token>` or in the `session` cookie.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let allowed = &state.config.api_tokens;
    if allowed.is_empty() {
        return Ok(next.run(req).await);
    }

    match presented_token(req.headers()) {
        Some(token) if is_allowed(allowed, &token) => Ok(next.run(req).await),
        Some(_) => {
            debug!(path = %req.uri().path(), "rejected unknown token");
            Err(AppError::Unauthorized)
        },
        None => {
            debug!(path = %req.uri().path(), "rejected request without token");
            Err(AppError::Unauthorized)
        },
    }
}

/// Compares against every configured token without short-circuiting. Lengths are not hidden.
fn is_allowed(allowed: &[String], token: &str) -> bool {
    allowed.iter().fold(false, |found, t| found | same_bytes(t.as_bytes(), token.as_bytes()))
}

fn same_bytes(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

fn presented_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    bearer.or_else(|| {
        CookieJar::from_headers(headers).get(SESSION_COOKIE).map(|c| c.value().to_string())
    })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn reads_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert_eq!(presented_token(&headers).as_deref(), Some("s3cret"));
    }

    #[test]
    fn falls_back_to_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("theme=dark; session=s3cret"));
        assert_eq!(presented_token(&headers).as_deref(), Some("s3cret"));
    }

    #[test]
    fn only_exact_configured_tokens_are_allowed() {
        let allowed = vec!["alpha-token".to_string(), "beta-token".to_string()];
        assert!(is_allowed(&allowed, "alpha-token"));
        assert!(is_allowed(&allowed, "beta-token"));
        assert!(!is_allowed(&allowed, "alpha-toke"));
        assert!(!is_allowed(&allowed, "alpha-tokenn"));
        assert!(!is_allowed(&allowed, "ALPHA-TOKEN"));
        assert!(!is_allowed(&allowed, ""));
        assert!(!is_allowed(&[], "alpha-token"));
    }

    #[test]
    fn other_schemes_are_not_tokens() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(presented_token(&headers), None);
        assert_eq!(presented_token(&HeaderMap::new()), None);
    }
}
