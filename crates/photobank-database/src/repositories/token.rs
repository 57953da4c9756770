//! Single-use token repository contract and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use photobank_core::error::{AppError, ErrorKind};
use photobank_core::result::AppResult;
use photobank_core::types::UserId;
use photobank_entity::token::{SingleUseToken, TokenPurpose};

use super::map_write_error;

/// Persistence contract for confirmation and reset tokens.
///
/// Deletes report how many rows they removed so that a redemption can tell
/// whether it won against a concurrent redemption of the same value.
#[async_trait]
pub trait SingleUseTokenRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Issue and store a fresh token for `user_id`.
    async fn create(&self, purpose: TokenPurpose, user_id: UserId) -> AppResult<SingleUseToken>;

    /// Look up a token by its value within a purpose.
    async fn find_by_value(
        &self,
        purpose: TokenPurpose,
        value: &str,
    ) -> AppResult<Option<SingleUseToken>>;

    /// Delete every token of `purpose` with this value.
    async fn delete_by_value(&self, purpose: TokenPurpose, value: &str) -> AppResult<u64>;

    /// Delete the token of `purpose` with this value only if `user_id` owns it.
    async fn delete_by_owner_and_value(
        &self,
        purpose: TokenPurpose,
        user_id: UserId,
        value: &str,
    ) -> AppResult<u64>;
}

/// PostgreSQL-backed [`SingleUseTokenRepository`].
#[derive(Debug, Clone)]
pub struct PgSingleUseTokenRepository {
    pool: PgPool,
}

impl PgSingleUseTokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SingleUseTokenRepository for PgSingleUseTokenRepository {
    async fn create(&self, purpose: TokenPurpose, user_id: UserId) -> AppResult<SingleUseToken> {
        let token = SingleUseToken::issue(purpose, user_id);
        sqlx::query_as::<_, SingleUseToken>(
            r#"
            INSERT INTO single_use_tokens (value, purpose, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING value, user_id, purpose, created_at
            "#,
        )
        .bind(&token.value)
        .bind(token.purpose)
        .bind(token.user_id)
        .bind(token.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error(
            "Failed to create single-use token",
            "Token value collision",
        ))
    }

    async fn find_by_value(
        &self,
        purpose: TokenPurpose,
        value: &str,
    ) -> AppResult<Option<SingleUseToken>> {
        sqlx::query_as::<_, SingleUseToken>(
            r#"
            SELECT value, user_id, purpose, created_at
            FROM single_use_tokens
            WHERE purpose = $1 AND value = $2
            "#,
        )
        .bind(purpose)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find single-use token", e)
        })
    }

    async fn delete_by_value(&self, purpose: TokenPurpose, value: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM single_use_tokens WHERE purpose = $1 AND value = $2")
            .bind(purpose)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete single-use token", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn delete_by_owner_and_value(
        &self,
        purpose: TokenPurpose,
        user_id: UserId,
        value: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM single_use_tokens WHERE purpose = $1 AND user_id = $2 AND value = $3",
        )
        .bind(purpose)
        .bind(user_id)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete single-use token", e)
        })?;
        Ok(result.rows_affected())
    }
}
