//! User repository contract and PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use photobank_core::error::{AppError, ErrorKind};
use photobank_core::result::AppResult;
use photobank_core::types::UserId;
use photobank_entity::user::{CreateUser, UpdateUser, User};

use super::map_write_error;

const DUPLICATE_USER: &str = "Username or email is already taken";

/// Persistence contract for accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find the first user whose username or email equals `identifier`
    /// (exact, case-sensitive).
    async fn find_by_username_or_email(&self, identifier: &str) -> AppResult<Option<User>>;

    /// List all users, oldest first.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Insert a new user. Fails with `Conflict` on a duplicate username or email.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Apply a partial update. Returns `None` if the user does not exist.
    async fn update(&self, id: UserId, changes: &UpdateUser) -> AppResult<Option<User>>;

    /// Mark the email address as confirmed. Returns `false` if the user does not exist.
    async fn set_email_confirmed(&self, id: UserId) -> AppResult<bool>;
}

/// PostgreSQL-backed [`UserRepository`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 OR email = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find user by username or email",
                e,
            )
        })
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(UserId::generate())
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error("Failed to create user", DUPLICATE_USER))
    }

    async fn update(&self, id: UserId, changes: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.username.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.password_hash.as_deref())
        .bind(changes.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error("Failed to update user", DUPLICATE_USER))
    }

    async fn set_email_confirmed(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET email_confirmed = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to confirm user email", e)
        })?;
        Ok(result.rows_affected() > 0)
    }
}
