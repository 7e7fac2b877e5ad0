use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::auth::jwt::Claims;
use crate::error::AppError;

/// Rejects the request with 401 unless it carries a valid `Bearer` token.
/// On success the decoded [`Claims`] are stored in the request extensions
/// before the wrapped handler runs.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = bearer_claims(req.headers(), &state.jwt_secret)?;
    tracing::debug!(user_id = %claims.sub, "bearer token accepted");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn bearer_claims(headers: &HeaderMap, secret: &str) -> Result<Claims, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::AuthFailed)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::AuthFailed)?;

    crate::auth::jwt::verify(token, secret).map_err(|_| AppError::AuthFailed)
}

/// Caller identity placed by [`require_bearer`].
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::AuthFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "middleware-test-secret-0123456789abcdef";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).expect("header"));
        headers
    }

    #[test]
    fn test_missing_header_is_rejected() {
        assert!(matches!(bearer_claims(&HeaderMap::new(), SECRET), Err(AppError::AuthFailed)));
    }

    #[test]
    fn test_non_bearer_scheme_is_rejected() {
        let token = crate::auth::jwt::issue(1, "a", SECRET, 1).expect("issue");
        let headers = headers_with(&format!("Basic {token}"));
        assert!(bearer_claims(&headers, SECRET).is_err());
    }

    #[test]
    fn test_valid_bearer_yields_claims() {
        let token = crate::auth::jwt::issue(5, "eve", SECRET, 1).expect("issue");
        let claims = bearer_claims(&headers_with(&format!("Bearer {token}")), SECRET)
            .expect("claims");
        assert_eq!(claims.sub, "5");
    }
}
