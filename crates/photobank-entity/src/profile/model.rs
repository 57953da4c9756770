//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use photobank_core::types::{ProfileId, UserId};

/// Public-facing details attached to a user. At most one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Unique profile identifier.
    pub id: ProfileId,
    /// Owning user.
    pub user_id: UserId,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Free-form description.
    pub about: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// A new profile for `user_id` populated from `payload`.
    pub fn new(user_id: UserId, payload: &UpdateProfile) -> Self {
        let now = Utc::now();
        let mut profile = Self {
            id: ProfileId::generate(),
            user_id,
            first_name: None,
            last_name: None,
            about: None,
            created_at: now,
            updated_at: now,
        };
        payload.apply_to(&mut profile);
        profile
    }
}

/// Profile fields to set. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Free-form description.
    pub about: Option<String>,
}

impl UpdateProfile {
    /// Applies the set fields to `profile` and bumps `updated_at`.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(first_name) = &self.first_name {
            profile.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &self.last_name {
            profile.last_name = Some(last_name.clone());
        }
        if let Some(about) = &self.about {
            profile.about = Some(about.clone());
        }
        profile.updated_at = Utc::now();
    }
}
