//! Authentication service — credential checks, token issuance, and token resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use photobank_auth::jwt::{AccessClaims, IssuedToken, RefreshClaims, TokenSigner};
use photobank_auth::password::PasswordHasher;
use photobank_core::error::AppError;
use photobank_core::result::AppResult;
use photobank_core::types::UserId;
use photobank_database::repositories::UserRepository;
use photobank_entity::user::PublicUser;

/// Outcome of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// The authenticated user.
    pub user: PublicUser,
    /// Signed access token.
    pub access_token: String,
    /// Access token expiry.
    pub access_expires_at: DateTime<Utc>,
    /// Signed refresh token.
    pub refresh_token: String,
    /// Refresh token expiry.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Handles credential verification and the access/refresh token pair.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    users: Arc<dyn UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token signer.
    signer: Arc<TokenSigner>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        signer: Arc<TokenSigner>,
    ) -> Self {
        Self {
            users,
            hasher,
            signer,
        }
    }

    /// Checks `password` against the account named by `identifier`
    /// (username or email, exact match).
    ///
    /// Returns `None` both when no account matches and when the password
    /// is wrong. Both paths run one full Argon2 verification.
    pub async fn validate_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> AppResult<Option<PublicUser>> {
        let Some(user) = self.users.find_by_username_or_email(identifier).await? else {
            self.hasher.verify_decoy(password).await?;
            return Ok(None);
        };

        if self.hasher.verify(password, &user.password_hash).await? {
            Ok(Some(user.into_public()))
        } else {
            Ok(None)
        }
    }

    /// Signs a 24h access token carrying the subject and username.
    pub fn issue_access_token(&self, user: &PublicUser) -> AppResult<IssuedToken> {
        let claims = AccessClaims {
            sub: user.id,
            username: user.username.clone(),
        };
        self.signer.issue(claims, AccessClaims::ttl())
    }

    /// Signs a 1h refresh token carrying the subject only.
    pub fn issue_refresh_token(&self, user: &PublicUser) -> AppResult<IssuedToken> {
        self.signer
            .issue(RefreshClaims { sub: user.id }, RefreshClaims::ttl())
    }

    /// Maps verified access-token claims back to a live account.
    ///
    /// `None` if the account is gone or its username has changed since the
    /// token was issued.
    pub async fn resolve_access_token_identity(
        &self,
        sub: UserId,
        claimed_username: &str,
    ) -> AppResult<Option<PublicUser>> {
        let user = self.users.find_by_id(sub).await?;
        Ok(user
            .filter(|u| u.username == claimed_username)
            .map(|u| u.into_public()))
    }

    /// Hashes a plaintext password.
    pub async fn hash_password(&self, plaintext: &str) -> AppResult<String> {
        self.hasher.hash(plaintext).await
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// Unknown account and wrong password fail identically.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<LoginResult> {
        let Some(user) = self.validate_credentials(identifier, password).await? else {
            debug!("Login rejected");
            return Err(AppError::invalid_credentials());
        };

        let access = self.issue_access_token(&user)?;
        let refresh = self.issue_refresh_token(&user)?;

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginResult {
            user,
            access_token: access.token,
            access_expires_at: access.expires_at,
            refresh_token: refresh.token,
            refresh_expires_at: refresh.expires_at,
        })
    }

    /// Resolves a bearer access token to the account it was issued for.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<PublicUser> {
        let verified = self.signer.verify::<AccessClaims>(access_token)?;
        let claims = verified.claims;

        self.resolve_access_token_identity(claims.sub, &claims.username)
            .await?
            .ok_or_else(|| AppError::invalid_token("Token subject is no longer valid"))
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<IssuedToken> {
        let verified = self.signer.verify::<RefreshClaims>(refresh_token)?;

        let user = self
            .users
            .find_by_id(verified.claims.sub)
            .await?
            .ok_or_else(|| AppError::invalid_token("Token subject is no longer valid"))?
            .into_public();

        debug!(user_id = %user.id, "Access token refreshed");
        self.issue_access_token(&user)
    }
}
