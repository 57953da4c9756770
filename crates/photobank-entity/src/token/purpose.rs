//! Single-use token purpose namespaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which flow a single-use token belongs to. Token values are unique
/// within a purpose, never across purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "token_purpose", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Confirms ownership of the registered email address.
    EmailConfirmation,
    /// Authorizes setting a new password.
    PasswordReset,
}

impl TokenPurpose {
    /// Return the purpose as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailConfirmation => "email_confirmation",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
