//! Account lifecycle — registration, email confirmation, password reset.

use std::sync::Arc;

use tracing::{debug, info};

use photobank_auth::password::{PasswordHasher, PasswordPolicy};
use photobank_core::error::AppError;
use photobank_core::result::AppResult;
use photobank_core::traits::MailMessage;
use photobank_database::repositories::{SingleUseTokenRepository, UserRepository};
use photobank_entity::token::{TokenPurpose, generate_token_value};
use photobank_entity::user::{CreateUser, PublicUser, UpdateUser, UserRole};
use photobank_mailer::MailOutbox;

use super::request::NewAccount;
use crate::validation::{require_present, validate};

const CONFIRM_EMAIL_SUBJECT: &str = "Confirm email";
const RESET_PASSWORD_SUBJECT: &str = "Reset password";

/// Handles the self-service account flows.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    users: Arc<dyn UserRepository>,
    /// Single-use token repository.
    tokens: Arc<dyn SingleUseTokenRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: PasswordPolicy,
    /// Fire-and-forget mail queue.
    outbox: MailOutbox,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn SingleUseTokenRepository>,
        hasher: Arc<PasswordHasher>,
        outbox: MailOutbox,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
            policy: PasswordPolicy::new(),
            outbox,
        }
    }

    /// Registers a new `USER` account and mails it an email-confirmation token.
    ///
    /// The confirmation mail is queued, not awaited: a delivery failure
    /// does not fail registration.
    pub async fn register(&self, candidate: NewAccount) -> AppResult<PublicUser> {
        require_present(&candidate.username, "username")?;
        require_present(&candidate.email, "email")?;
        validate(&candidate)?;
        self.policy.check(&candidate.password)?;

        let password_hash = self.hasher.hash(&candidate.password).await?;

        let user = self
            .users
            .create(CreateUser {
                username: candidate.username,
                email: candidate.email,
                password_hash,
                role: UserRole::User,
            })
            .await?;

        let token = self
            .tokens
            .create(TokenPurpose::EmailConfirmation, user.id)
            .await?;

        self.outbox.submit(MailMessage::new(
            &user.email,
            CONFIRM_EMAIL_SUBJECT,
            format!("Your confirmation token: {}", token.value),
        ));

        info!(user_id = %user.id, username = %user.username, "Account registered");

        Ok(user.into_public())
    }

    /// Redeems an email-confirmation token and marks its owner confirmed.
    ///
    /// A token redeems once; every later attempt fails with `TokenNotFound`.
    pub async fn confirm_email(&self, token: &str) -> AppResult<PublicUser> {
        require_present(token, "token")?;

        let record = self
            .tokens
            .find_by_value(TokenPurpose::EmailConfirmation, token)
            .await?
            .ok_or_else(AppError::token_not_found)?;

        // Consume before applying so only one concurrent redemption proceeds.
        let removed = self
            .tokens
            .delete_by_value(TokenPurpose::EmailConfirmation, token)
            .await?;
        if removed == 0 {
            return Err(AppError::token_not_found());
        }

        if !self.users.set_email_confirmed(record.user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        let user = self
            .users
            .find_by_id(record.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %user.id, "Email confirmed");

        Ok(user.into_public())
    }

    /// Issues a password-reset token for the account named by
    /// `identifier` (username or email) and mails it.
    ///
    /// An unknown identifier is a silent no-op: no token, no mail, no error.
    pub async fn request_password_reset(&self, identifier: &str) -> AppResult<()> {
        require_present(identifier, "email")?;

        let Some(user) = self.users.find_by_username_or_email(identifier).await? else {
            // Match the token store round trip of the known-account path.
            self.tokens
                .find_by_value(TokenPurpose::PasswordReset, &generate_token_value())
                .await?;
            debug!("Password reset requested for unknown identifier");
            return Ok(());
        };

        let token = self
            .tokens
            .create(TokenPurpose::PasswordReset, user.id)
            .await?;

        self.outbox.submit(MailMessage::new(
            &user.email,
            RESET_PASSWORD_SUBJECT,
            format!("Your reset password token: {}", token.value),
        ));

        info!(user_id = %user.id, "Password reset requested");

        Ok(())
    }

    /// Resolves a password-reset token to its owner without consuming it.
    pub async fn validate_reset_token(&self, token: &str) -> AppResult<PublicUser> {
        let record = self
            .tokens
            .find_by_value(TokenPurpose::PasswordReset, token)
            .await?
            .ok_or_else(AppError::token_not_found)?;

        self.users
            .find_by_id(record.user_id)
            .await?
            .map(|u| u.into_public())
            .ok_or_else(AppError::token_not_found)
    }

    /// Redeems a password-reset token, replacing its owner's password.
    ///
    /// The length rule is checked before the token is looked at. Only the
    /// token matching both owner and value is consumed.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> AppResult<PublicUser> {
        self.policy.check(new_password)?;

        if token.is_empty() {
            return Err(AppError::invalid_token("Invalid token"));
        }

        let record = self
            .tokens
            .find_by_value(TokenPurpose::PasswordReset, token)
            .await?
            .ok_or_else(|| AppError::invalid_token("Invalid token"))?;

        let password_hash = self.hasher.hash(new_password).await?;

        let removed = self
            .tokens
            .delete_by_owner_and_value(TokenPurpose::PasswordReset, record.user_id, token)
            .await?;
        if removed == 0 {
            return Err(AppError::invalid_token("Invalid token"));
        }

        let user = self
            .users
            .update(record.user_id, &UpdateUser::password(password_hash))
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %user.id, "Password reset completed");

        Ok(user.into_public())
    }
}
