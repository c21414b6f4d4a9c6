//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthService;
use crate::services::QuoteService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub quote_service: Arc<QuoteService>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, quote_service: Arc<QuoteService>) -> Self {
        Self {
            auth_service,
            quote_service,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<QuoteService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.quote_service.clone()
    }
}
