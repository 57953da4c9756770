//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token signing configuration.
///
/// Token lifetimes and the password policy are fixed constants of the
/// auth crate; only the signing material is configurable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required.
    #[serde(default)]
    pub jwt_secret: String,
    /// Clock skew tolerated when checking token expiry, in seconds.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
}

impl AuthConfig {
    /// Creates a config with the given secret and no leeway.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            jwt_leeway_seconds: 0,
        }
    }

    /// Fails if the signing secret is missing.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must be set"));
        }
        Ok(())
    }
}
