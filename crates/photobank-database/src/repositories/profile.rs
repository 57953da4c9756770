//! Profile repository contract and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use photobank_core::error::{AppError, ErrorKind};
use photobank_core::result::AppResult;
use photobank_core::types::{ProfileId, UserId};
use photobank_entity::profile::{Profile, UpdateProfile};

use super::map_write_error;

/// Persistence contract for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a profile by primary key.
    async fn find_by_id(&self, id: ProfileId) -> AppResult<Option<Profile>>;

    /// Find the profile owned by `user_id`.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>>;

    /// List all profiles, oldest first.
    async fn find_all(&self) -> AppResult<Vec<Profile>>;

    /// Create the profile for `user_id`. Fails with `Conflict` if one exists.
    async fn create(&self, user_id: UserId, payload: &UpdateProfile) -> AppResult<Profile>;

    /// Update the profile owned by `user_id`. Returns `None` if there is none.
    async fn update(&self, user_id: UserId, payload: &UpdateProfile) -> AppResult<Option<Profile>>;
}

/// PostgreSQL-backed [`ProfileRepository`].
#[derive(Debug, Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: ProfileId) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find profile by user", e)
            })
    }

    async fn find_all(&self) -> AppResult<Vec<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list profiles", e))
    }

    async fn create(&self, user_id: UserId, payload: &UpdateProfile) -> AppResult<Profile> {
        let profile = Profile::new(user_id, payload);
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, user_id, first_name, last_name, about, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.about)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error(
            "Failed to create profile",
            "Profile already exists",
        ))
    }

    async fn update(&self, user_id: UserId, payload: &UpdateProfile) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                about = COALESCE($4, about),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(payload.first_name.as_deref())
        .bind(payload.last_name.as_deref())
        .bind(payload.about.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))
    }
}
