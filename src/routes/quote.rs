//! Quote routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::quote;
use crate::state::AppState;

/// Create quote routes. Every route here is protected by the auth gate.
pub fn quote_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/quotes",
            get(quote::list_quotes).post(quote::create_quote),
        )
        .route("/api/quotes/:id/like", post(quote::like_quote))
}
