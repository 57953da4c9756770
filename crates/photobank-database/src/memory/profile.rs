//! In-memory profile repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use photobank_core::error::AppError;
use photobank_core::result::AppResult;
use photobank_core::types::{ProfileId, UserId};
use photobank_entity::profile::{Profile, UpdateProfile};

use crate::repositories::ProfileRepository;

/// [`ProfileRepository`] keyed by owning user.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl MemoryProfileRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn find_by_id(&self, id: ProfileId) -> AppResult<Option<Profile>> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Profile>> {
        let mut profiles: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        profiles.sort_by_key(|p| p.created_at);
        Ok(profiles)
    }

    async fn create(&self, user_id: UserId, payload: &UpdateProfile) -> AppResult<Profile> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&user_id) {
            return Err(AppError::conflict("Profile already exists"));
        }
        let profile = Profile::new(user_id, payload);
        profiles.insert(user_id, profile.clone());
        Ok(profile)
    }

    async fn update(&self, user_id: UserId, payload: &UpdateProfile) -> AppResult<Option<Profile>> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(&user_id).map(|profile| {
            payload.apply_to(profile);
            profile.clone()
        }))
    }
}
