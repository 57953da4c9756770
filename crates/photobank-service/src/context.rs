//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use photobank_core::types::UserId;
use photobank_entity::user::{PublicUser, UserRole};

/// Context for the current authenticated request.
///
/// Built from the identity resolved by [`crate::AuthService::authenticate`]
/// and passed into service methods so that every operation knows who is
/// acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The username at resolution time.
    pub username: String,
    /// The user's stored role at resolution time.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `user`.
    pub fn new(user: &PublicUser) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&PublicUser> for RequestContext {
    fn from(user: &PublicUser) -> Self {
        Self::new(user)
    }
}
