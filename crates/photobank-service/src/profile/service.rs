//! Profile lookup and lazy create-or-update.

use std::sync::Arc;

use tracing::{debug, info};

use photobank_auth::rbac::require_role;
use photobank_core::error::{AppError, ErrorKind};
use photobank_core::result::AppResult;
use photobank_core::types::{ProfileId, UserId};
use photobank_database::repositories::{ProfileRepository, UserRepository};
use photobank_entity::profile::{Profile, UpdateProfile};
use photobank_entity::user::UserRole;

use crate::context::RequestContext;

/// Manages the optional profile attached to each user.
///
/// Profiles are created on first access; callers never see "no profile"
/// for an existing user.
#[derive(Debug, Clone)]
pub struct ProfileService {
    /// Profile repository.
    profiles: Arc<dyn ProfileRepository>,
    /// User repository, for target existence checks.
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(profiles: Arc<dyn ProfileRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { profiles, users }
    }

    /// Returns the caller's profile, creating an empty one on first access.
    pub async fn get_own(&self, ctx: &RequestContext) -> AppResult<Profile> {
        if let Some(profile) = self.profiles.find_by_user(ctx.user_id).await? {
            return Ok(profile);
        }

        match self.profiles.create(ctx.user_id, &UpdateProfile::default()).await {
            Ok(profile) => {
                debug!(user_id = %ctx.user_id, "Default profile created");
                Ok(profile)
            }
            // lost a race with a concurrent first access
            Err(e) if e.kind == ErrorKind::Conflict => self
                .profiles
                .find_by_user(ctx.user_id)
                .await?
                .ok_or(e),
            Err(e) => Err(e),
        }
    }

    /// Updates the caller's profile, creating it from `payload` if missing.
    pub async fn update_own(
        &self,
        ctx: &RequestContext,
        payload: UpdateProfile,
    ) -> AppResult<Profile> {
        let profile = self.upsert(ctx.user_id, &payload).await?;
        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(profile)
    }

    /// Updates another user's profile (admin only), creating it if missing.
    pub async fn update_for_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        payload: UpdateProfile,
    ) -> AppResult<Profile> {
        require_role(&[UserRole::Admin], ctx.role)?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        let profile = self.upsert(user_id, &payload).await?;
        info!(admin_id = %ctx.user_id, target_id = %user_id, "Profile updated by admin");
        Ok(profile)
    }

    /// Gets a profile by its own ID.
    pub async fn get_by_id(&self, id: ProfileId) -> AppResult<Profile> {
        self.profiles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Lists every profile.
    pub async fn list(&self) -> AppResult<Vec<Profile>> {
        self.profiles.find_all().await
    }

    async fn upsert(&self, user_id: UserId, payload: &UpdateProfile) -> AppResult<Profile> {
        if let Some(profile) = self.profiles.update(user_id, payload).await? {
            return Ok(profile);
        }

        match self.profiles.create(user_id, payload).await {
            Ok(profile) => Ok(profile),
            Err(e) if e.kind == ErrorKind::Conflict => {
                self.profiles.update(user_id, payload).await?.ok_or(e)
            }
            Err(e) => Err(e),
        }
    }
}
