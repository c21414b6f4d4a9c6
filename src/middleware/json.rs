//! JSON body extraction with API-shaped rejections
//!
//! `axum::Json` replies to undecodable bodies with its own plain-text
//! rejection; this wrapper reshapes those into the
//! `{"status": "error", "message": ...}` body every other error uses.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON extractor whose rejection is an [`ApiError`]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        Ok(ApiJson(value))
    }
}
