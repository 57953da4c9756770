//! In-memory user repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use photobank_core::error::AppError;
use photobank_core::result::AppResult;
use photobank_core::types::UserId;
use photobank_entity::user::{CreateUser, UpdateUser, User};

use crate::repositories::UserRepository;

/// [`UserRepository`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no users are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn taken_by_other(
    users: &HashMap<UserId, User>,
    except: Option<UserId>,
    username: Option<&str>,
    email: Option<&str>,
) -> bool {
    users.values().filter(|u| Some(u.id) != except).any(|u| {
        username.is_some_and(|name| u.username == name) || email.is_some_and(|mail| u.email == mail)
    })
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.matches_identifier(identifier))
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if taken_by_other(&users, None, Some(&data.username), Some(&data.email)) {
            return Err(AppError::conflict("Username or email is already taken"));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            email_confirmed: false,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, changes: &UpdateUser) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        if taken_by_other(
            &users,
            Some(id),
            changes.username.as_deref(),
            changes.email.as_deref(),
        ) {
            return Err(AppError::conflict("Username or email is already taken"));
        }

        Ok(users.get_mut(&id).map(|user| {
            changes.apply_to(user);
            user.clone()
        }))
    }

    async fn set_email_confirmed(&self, id: UserId) -> AppResult<bool> {
        let mut users = self.users.write().await;
        Ok(users
            .get_mut(&id)
            .map(|user| {
                user.email_confirmed = true;
                user.updated_at = Utc::now();
            })
            .is_some())
    }
}
