//! Authentication gate
//!
//! Extractor that verifies the bearer token on every protected request and
//! exposes the decoded claims to the handler. A request with no usable
//! `Authorization` header is rejected with 401; a request whose token is
//! present but fails signature, shape, or expiry checks is rejected with
//! 403. Clients depend on that distinction.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::jwt::JwtError;
use crate::auth::{verify_token, AuthService, Claims};
use crate::error::ApiError;

/// Authenticated user extracted from a verified token.
///
/// Lives for one request; nothing persists across requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(user: AuthenticatedUser) -> impl IntoResponse {
///     format!("Hello, user {}", user.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub claims: Claims,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // No token, no entry: 401.
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    ApiError::Unauthenticated(
                        "Authorization header with Bearer token required".to_string(),
                    )
                })?;

        let auth_service = Arc::<AuthService>::from_ref(state);

        // Bad token, no entry: 403.
        let claims =
            verify_token(bearer.token(), auth_service.jwt_secret()).map_err(|e| match e {
                JwtError::TokenExpired => ApiError::Forbidden("Token has expired".to_string()),
                _ => ApiError::Forbidden("Invalid token".to_string()),
            })?;

        Ok(AuthenticatedUser {
            user_id: claims.id,
            email: claims.email.clone(),
            claims,
        })
    }
}
