//! Authentication models for Quotewall

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{Gender, User};
use crate::auth::jwt::Claims;

/// User identity plus password hash. This is the only shape that carries
/// the hash; it is fetched exclusively by the login flow and its `Debug`
/// output redacts the secret.
#[derive(Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Registration request. Fields default so that absent keys surface as
/// validation failures in the API error shape rather than decode errors.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Name is required and cannot exceed 50 characters"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords don't match!"))]
    pub confirm_password: String,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(custom = "validate_gender")]
    pub gender: Option<String>,

    pub age: Option<i32>,

    #[validate(custom = "validate_agree_to_terms")]
    pub agree_to_terms: bool,
}

/// Login request. Defaults keep absent fields on the normal path: an
/// empty email matches no user and the caller sees the usual 401.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registered user as returned by the API (password omitted)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub agree_to_terms: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            gender: user.gender,
            age: user.age,
            agree_to_terms: user.agree_to_terms,
            created_at: user.created_at,
        }
    }
}

/// Response for a successful registration
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: String,
    pub user: UserResponse,
}

/// Identity subset returned with a login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    pub token: String,
    pub user: LoginUser,
}

/// Response for a successful token verification
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: Claims,
}

// ============================================================================
// Field validators
// ============================================================================

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));

    if !allowed || !(7..=15).contains(&digits) {
        let mut err = ValidationError::new("phone");
        err.message = Some("Please enter a valid phone number".into());
        return Err(err);
    }
    Ok(())
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    if Gender::parse(gender).is_none() {
        let mut err = ValidationError::new("gender");
        err.message = Some("Gender must be male or female".into());
        return Err(err);
    }
    Ok(())
}

fn validate_agree_to_terms(agreed: &bool) -> Result<(), ValidationError> {
    if !agreed {
        let mut err = ValidationError::new("agree_to_terms");
        err.message = Some("You must accept the terms and conditions".into());
        return Err(err);
    }
    Ok(())
}
