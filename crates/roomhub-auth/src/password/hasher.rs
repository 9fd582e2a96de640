//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use roomhub_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// A stored value that is not a PHC string never matches.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return Ok(false);
        };

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("s3cret!").expect("hash");

        assert_ne!(hash, "s3cret!");
        assert!(hasher.verify_password("s3cret!", &hash).expect("verify"));
        assert!(!hasher.verify_password("wrong", &hash).expect("verify"));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("same").expect("hash");
        let b = hasher.hash_password("same").expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_never_matches() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("x", "plain-text").expect("verify"));
    }
}
