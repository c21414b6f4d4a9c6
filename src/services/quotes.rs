//! Quote data access
//!
//! Plain persistence operations for the community feed. The auth gate in
//! front of these is the interesting part; this service is a collaborator
//! with no design content of its own.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::QuoteWithAuthor;

/// Quote service errors
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Quote not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for QuoteError {
    fn from(e: sqlx::Error) -> Self {
        QuoteError::Database(e.to_string())
    }
}

impl From<QuoteError> for ApiError {
    fn from(e: QuoteError) -> Self {
        match e {
            QuoteError::NotFound => ApiError::NotFound(e.to_string()),
            QuoteError::Database(detail) => ApiError::Internal(detail),
        }
    }
}

/// Quote service
#[derive(Clone)]
pub struct QuoteService {
    db_pool: PgPool,
}

impl QuoteService {
    /// Create a new QuoteService
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// List the community feed, newest first, with authors populated
    pub async fn list(&self) -> Result<Vec<QuoteWithAuthor>, QuoteError> {
        let quotes = sqlx::query_as(
            r#"
            SELECT q.id, q.text, q.likes, q.created_at,
                   u.name AS author_name, u.email AS author_email
            FROM quotes q
            JOIN users u ON u.id = q.author_id
            ORDER BY q.created_at DESC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(quotes)
    }

    /// Insert a quote for the authenticated author
    pub async fn create(&self, author_id: Uuid, text: &str) -> Result<QuoteWithAuthor, QuoteError> {
        let quote = sqlx::query_as(
            r#"
            WITH inserted AS (
                INSERT INTO quotes (id, text, author_id)
                VALUES ($1, $2, $3)
                RETURNING id, text, likes, created_at, author_id
            )
            SELECT i.id, i.text, i.likes, i.created_at,
                   u.name AS author_name, u.email AS author_email
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(text)
        .bind(author_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(quote)
    }

    /// Increment a quote's like counter atomically
    pub async fn like(&self, quote_id: Uuid) -> Result<QuoteWithAuthor, QuoteError> {
        let quote = sqlx::query_as(
            r#"
            WITH updated AS (
                UPDATE quotes
                SET likes = likes + 1
                WHERE id = $1
                RETURNING id, text, likes, created_at, author_id
            )
            SELECT up.id, up.text, up.likes, up.created_at,
                   u.name AS author_name, u.email AS author_email
            FROM updated up
            JOIN users u ON u.id = up.author_id
            "#,
        )
        .bind(quote_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(QuoteError::NotFound)?;

        Ok(quote)
    }
}
