//! Password policy for new passwords.

use photobank_core::error::AppError;

/// Minimum number of characters in a password.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Validates new passwords. The only rule is a minimum length.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Policy with [`PASSWORD_MIN_LENGTH`].
    pub fn new() -> Self {
        Self {
            min_length: PASSWORD_MIN_LENGTH,
        }
    }

    /// The enforced minimum length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Fails with `WeakCredential` if the password has fewer than
    /// [`Self::min_length`] characters.
    pub fn check(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::weak_credential(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}
