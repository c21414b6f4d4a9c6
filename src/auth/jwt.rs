//! Token issuance and verification
//!
//! Issues signed, time-bounded bearer tokens and validates them against
//! the configured secret. Issuance is a pure function of the claims, the
//! secret, the clock, and the configured TTL; no state is kept.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Token claims. Exactly the identity reference and email plus the
/// standard issued-at/expiry pair; tokens carrying anything else fail to
/// decode and are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// User id
    pub id: Uuid,
    /// User email
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Issue a signed token for a verified identity
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, JwtError> {
    issue_token_at(Utc::now(), user_id, email, secret, ttl_seconds)
}

/// Issue a token as of an explicit instant. Exists so expiry behavior can
/// be exercised without waiting on the wall clock.
pub fn issue_token_at(
    now: DateTime<Utc>,
    user_id: Uuid,
    email: &str,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, JwtError> {
    let exp = now + Duration::seconds(ttl_seconds);

    let claims = Claims {
        id: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Verify a token's signature and expiry and decode its claims.
///
/// A token is valid iff the signature verifies against `secret` and the
/// current time is before `exp`; no leeway is granted.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::InvalidToken(e.to_string()),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key";
    const TTL: i64 = 3600;

    #[test]
    fn test_issued_token_verifies_and_roundtrips_claims() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, "ada@example.com", SECRET, TTL).unwrap();
        assert!(!token.is_empty());

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.id, user_id);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, TTL);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Issue as of two hours ago with a one-hour TTL.
        let past = Utc::now() - Duration::hours(2);
        let token = issue_token_at(past, Uuid::new_v4(), "ada@example.com", SECRET, TTL).unwrap();

        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "ada@example.com", "secret1", TTL).unwrap();
        let result = verify_token(&token, "secret2");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_corrupted_token_is_rejected() {
        let token = issue_token(Uuid::new_v4(), "ada@example.com", SECRET, TTL).unwrap();
        let truncated = &token[..token.len() - 4];
        assert!(verify_token(truncated, SECRET).is_err());

        assert!(verify_token("invalid.token.here", SECRET).is_err());
        assert!(verify_token("", SECRET).is_err());
    }

    #[test]
    fn test_foreign_claim_shape_is_rejected() {
        // A structurally valid token whose payload carries extra claims
        // does not decode to the documented shape.
        let now = Utc::now().timestamp();
        let foreign = serde_json::json!({
            "id": Uuid::new_v4(),
            "email": "ada@example.com",
            "iat": now,
            "exp": now + TTL,
            "role": "admin",
        });
        let token = encode(
            &Header::default(),
            &foreign,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
