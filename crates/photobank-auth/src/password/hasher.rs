//! Argon2id password hashing and verification.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString},
};
use rand_core::OsRng;
use tokio::sync::OnceCell;

use photobank_core::error::AppError;
use photobank_core::result::AppResult;

/// Plaintext behind the decoy digest. Its value is irrelevant: the decoy
/// path reports a mismatch regardless of the verification outcome.
const DECOY_PLAINTEXT: &str = "photobank-decoy-credential";

/// Handles password hashing and verification using Argon2id.
///
/// The synchronous methods do the CPU-bound work inline. The async methods
/// move it onto Tokio's blocking pool so concurrent requests keep running.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    /// Digest verified against when the account does not exist.
    decoy: Arc<OnceCell<String>>,
}

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors only for a malformed digest.
    /// The underlying comparison is constant-time.
    pub fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// [`Self::hash_password`] on the blocking pool.
    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let hasher = self.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password)).await?
    }

    /// [`Self::verify_password`] on the blocking pool.
    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let hasher = self.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash)).await?
    }

    /// Runs a full verification against a decoy digest and reports a mismatch.
    ///
    /// Called when no account matched, so the unknown-user path costs the
    /// same as a wrong password.
    pub async fn verify_decoy(&self, password: &str) -> AppResult<bool> {
        let decoy = self
            .decoy
            .get_or_try_init(|| self.hash(DECOY_PLAINTEXT))
            .await?;
        self.verify(password, decoy).await?;
        Ok(false)
    }
}
