//! Data models for the Quotewall backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub mod auth;
pub use auth::*;

/// User row as stored in the database. The password hash lives in
/// [`auth::UserCredentials`] and is never part of this type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub agree_to_terms: bool,
    pub created_at: DateTime<Utc>,
}

/// Gender values accepted at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a user-supplied gender value, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Quote row joined with its author, as read for the feed
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuoteWithAuthor {
    pub id: Uuid,
    pub text: String,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
}

/// Request body for submitting a quote
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateQuoteRequest {
    #[validate(length(
        min = 1,
        max = 500,
        message = "Quote text is required and cannot exceed 500 characters"
    ))]
    pub text: String,
}

/// Quote author as exposed on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteAuthor {
    pub name: String,
    pub email: String,
}

/// Quote as exposed on the wire. The id keeps the `_id` key the
/// dashboard client reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    pub author: QuoteAuthor,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<QuoteWithAuthor> for QuoteResponse {
    fn from(quote: QuoteWithAuthor) -> Self {
        Self {
            id: quote.id,
            text: quote.text,
            author: QuoteAuthor {
                name: quote.author_name,
                email: quote.author_email,
            },
            likes: quote.likes,
            created_at: quote.created_at,
        }
    }
}

/// Feed response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct QuotesResponse {
    pub quotes: Vec<QuoteResponse>,
}
