//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use photobank_core::types::UserId;

use super::role::UserRole;

/// A registered account as stored by the user repository.
///
/// This is the only shape that carries the password hash. It never leaves
/// the service layer: every public operation returns a [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash (PHC string).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// Whether the email address has been confirmed.
    pub email_confirmed: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether `identifier` names this account by username or email.
    ///
    /// Exact, case-sensitive comparison on both fields.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.username == identifier || self.email == identifier
    }

    /// Drops the password hash.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
            email_confirmed: self.email_confirmed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// An account with the password hash removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// User role.
    pub role: UserRole,
    /// Whether the email address has been confirmed.
    pub email_confirmed: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        user.into_public()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Partial update applied by the user repository. `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
}

impl UpdateUser {
    /// An update that only replaces the password hash.
    pub fn password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Self::default()
        }
    }

    /// Applies the set fields to `user` and bumps `updated_at`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        let now = Utc::now();
        User {
            id: UserId::generate(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            role: UserRole::User,
            email_confirmed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");

        let public = serde_json::to_value(sample().into_public()).unwrap();
        assert!(public.get("password_hash").is_none());
    }

    #[test]
    fn test_matches_identifier_is_exact() {
        let user = sample();
        assert!(user.matches_identifier("alice"));
        assert!(user.matches_identifier("a@x.com"));
        assert!(!user.matches_identifier("Alice"));
        assert!(!user.matches_identifier("A@X.COM"));
    }

    #[test]
    fn test_apply_update() {
        let mut user = sample();
        UpdateUser {
            role: Some(UserRole::Admin),
            ..UpdateUser::default()
        }
        .apply_to(&mut user);
        assert!(user.is_admin());
        assert_eq!(user.username, "alice");
    }
}
