//! Account candidate submitted at registration or by an admin.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration candidate. The password is plaintext until hashed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewAccount {
    /// Desired username.
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl NewAccount {
    /// Builds a candidate.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}
