//! Quote HTTP handlers
//!
//! All of these sit behind the auth gate; the author of a new quote comes
//! from the verified request context, never from the body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::middleware::{ApiJson, AuthenticatedUser};
use crate::models::{CreateQuoteRequest, QuoteResponse, QuotesResponse};
use crate::state::AppState;

/// GET /api/quotes - The community feed
pub async fn list_quotes(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<Json<QuotesResponse>> {
    let quotes = state.quote_service.list().await?;

    Ok(Json(QuotesResponse {
        quotes: quotes.into_iter().map(QuoteResponse::from).collect(),
    }))
}

/// POST /api/quotes - Submit a new quote
pub async fn create_quote(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(req): ApiJson<CreateQuoteRequest>,
) -> ApiResult<(StatusCode, Json<QuoteResponse>)> {
    req.validate()?;

    let quote = state.quote_service.create(user.user_id, &req.text).await?;

    Ok((StatusCode::CREATED, Json(quote.into())))
}

/// POST /api/quotes/:id/like - Like a quote
pub async fn like_quote(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(quote_id): Path<Uuid>,
) -> ApiResult<Json<QuoteResponse>> {
    let quote = state.quote_service.like(quote_id).await?;

    Ok(Json(quote.into()))
}
