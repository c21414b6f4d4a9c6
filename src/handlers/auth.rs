//! Authentication HTTP handlers
//!
//! Endpoints for registration, login, and token verification.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiResult;
use crate::middleware::{ApiJson, AuthenticatedUser};
use crate::models::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, VerifyResponse,
};
use crate::state::AppState;

/// POST /api/register - Create a new user
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    let user = state.auth_service.register(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "success".to_string(),
            user: user.into(),
        }),
    ))
}

/// POST /api/login - Verify credentials and issue a token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(response))
}

/// GET /api/verify-token - Report whether the presented token is valid
///
/// The gate does all the work; reaching this handler means the token
/// verified, so the response simply echoes the decoded claims.
pub async fn verify_token(user: AuthenticatedUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user: user.claims,
    })
}
