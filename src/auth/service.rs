//! Authentication service
//!
//! Core business logic for email/password authentication: credential
//! storage, password verification, and token issuance on login.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Gender, LoginResponse, LoginUser, RegisterRequest, User, UserCredentials};

use super::jwt::{self, JwtError};
use super::password::{self, PasswordError};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Duplicate email or Email already in use")]
    DuplicateEmail,

    #[error("Wrong email or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            // Concurrent registrations with the same email are serialized
            // by the UNIQUE constraint; the loser surfaces here.
            if db_err.is_unique_violation() {
                return AuthError::DuplicateEmail;
            }
        }
        AuthError::Database(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::DuplicateEmail => ApiError::Conflict(e.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthenticated(e.to_string()),
            AuthError::Database(detail) => ApiError::Internal(detail),
            AuthError::Password(p) => ApiError::Internal(p.to_string()),
            AuthError::Token(t) => ApiError::Internal(t.to_string()),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
    jwt_secret: String,
    jwt_ttl_seconds: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(db_pool: PgPool, jwt_secret: String, jwt_ttl_seconds: i64, bcrypt_cost: u32) -> Self {
        Self {
            db_pool,
            jwt_secret,
            jwt_ttl_seconds,
            bcrypt_cost,
        }
    }

    /// Register a new user.
    ///
    /// The caller has already validated the request shape. Hashing happens
    /// here, explicitly, before the row is constructed; the plaintext is
    /// dropped as soon as the hash exists and is never persisted or logged.
    pub async fn register(&self, req: &RegisterRequest) -> Result<User, AuthError> {
        let name = req.name.trim().to_string();
        let email = req.email.trim().to_lowercase();
        let gender = req.gender.as_deref().and_then(Gender::parse);

        let password_hash = password::hash_password(req.password.clone(), self.bcrypt_cost).await?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, password_hash, phone, gender, age, agree_to_terms)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, gender, age, agree_to_terms, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&name)
        .bind(&email)
        .bind(&password_hash)
        .bind(&req.phone)
        .bind(gender)
        .bind(req.age)
        .bind(req.agree_to_terms)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(user_id = %user.id, "New user registered");

        Ok(user)
    }

    /// Look up a user by email, including the password hash.
    ///
    /// This is the only retrieval path that carries the hash; it exists
    /// for the login flow and nothing else.
    pub async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AuthError> {
        let credentials = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(credentials)
    }

    /// Compare a candidate password against stored credentials
    pub async fn verify_password(
        &self,
        credentials: &UserCredentials,
        candidate: &str,
    ) -> Result<bool, AuthError> {
        let matches =
            password::verify_password(candidate.to_string(), credentials.password_hash.clone())
                .await?;

        Ok(matches)
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown email and wrong password both collapse into the same
    /// `InvalidCredentials` error so the response never reveals which
    /// half was wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let email = email.trim().to_lowercase();

        let credentials = self
            .find_by_email_with_secret(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(&credentials, password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = jwt::issue_token(
            credentials.id,
            &credentials.email,
            &self.jwt_secret,
            self.jwt_ttl_seconds,
        )?;

        tracing::info!(user_id = %credentials.id, "User logged in");

        Ok(LoginResponse {
            status: "success".to_string(),
            token,
            user: LoginUser {
                id: credentials.id,
                name: credentials.name,
                email: credentials.email,
            },
        })
    }

    /// Get JWT secret (for the auth gate)
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
