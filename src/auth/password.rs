//! Password hashing and verification
//!
//! bcrypt with a tunable work factor. Hashing and comparison are CPU-bound
//! and run on the blocking thread pool so a slow hash never stalls other
//! in-flight requests.

use thiserror::Error;

/// Default bcrypt work factor
pub const DEFAULT_COST: u32 = 10;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Hashing task failed: {0}")]
    Runtime(String),
}

impl From<bcrypt::BcryptError> for PasswordError {
    fn from(e: bcrypt::BcryptError) -> Self {
        PasswordError::Hashing(e.to_string())
    }
}

/// Compute a salted bcrypt hash of `password`.
///
/// The plaintext is moved in and dropped when hashing completes; callers
/// must not retain their own copy beyond the registration flow.
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| PasswordError::Runtime(e.to_string()))??;

    Ok(hash)
}

/// Verify `password` against a stored bcrypt hash.
///
/// Delegates to the bcrypt library's comparison, which is constant-time;
/// never compare hashes with string equality.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| PasswordError::Runtime(e.to_string()))??;

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the test suite fast; production cost comes
    // from configuration.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn test_hash_never_equals_plaintext() {
        let hash = hash_password("longenough1".to_string(), TEST_COST)
            .await
            .unwrap();
        assert_ne!(hash, "longenough1");
        assert!(!hash.is_empty());
    }

    #[tokio::test]
    async fn test_correct_password_verifies() {
        let hash = hash_password("longenough1".to_string(), TEST_COST)
            .await
            .unwrap();
        assert!(verify_password("longenough1".to_string(), hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_wrong_password_fails() {
        let hash = hash_password("longenough1".to_string(), TEST_COST)
            .await
            .unwrap();
        assert!(!verify_password("wrongpassword".to_string(), hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_one_character_difference_fails() {
        let hash = hash_password("longenough1".to_string(), TEST_COST)
            .await
            .unwrap();
        assert!(!verify_password("longenough2".to_string(), hash)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        // Salts are random, so two hashes of the same input differ.
        let first = hash_password("longenough1".to_string(), TEST_COST)
            .await
            .unwrap();
        let second = hash_password("longenough1".to_string(), TEST_COST)
            .await
            .unwrap();
        assert_ne!(first, second);
    }
}
