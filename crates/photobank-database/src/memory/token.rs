//! In-memory single-use token repository.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use photobank_core::error::AppError;
use photobank_core::result::AppResult;
use photobank_core::types::UserId;
use photobank_entity::token::{SingleUseToken, TokenPurpose};

use crate::repositories::SingleUseTokenRepository;

/// [`SingleUseTokenRepository`] keyed by `(purpose, value)`.
#[derive(Debug, Clone, Default)]
pub struct MemorySingleUseTokenRepository {
    tokens: Arc<RwLock<HashMap<(TokenPurpose, String), SingleUseToken>>>,
}

impl MemorySingleUseTokenRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding tokens of `purpose` owned by `user_id`.
    pub async fn outstanding(&self, purpose: TokenPurpose, user_id: UserId) -> Vec<SingleUseToken> {
        self.tokens
            .read()
            .await
            .values()
            .filter(|t| t.purpose == purpose && t.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Stores a prepared token, rejecting a `(purpose, value)` already in use.
    async fn insert(&self, token: SingleUseToken) -> AppResult<SingleUseToken> {
        let mut tokens = self.tokens.write().await;
        match tokens.entry((token.purpose, token.value.clone())) {
            Entry::Occupied(_) => Err(AppError::conflict("Token value collision")),
            Entry::Vacant(slot) => Ok(slot.insert(token).clone()),
        }
    }

    /// Total number of stored tokens across all purposes.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether no tokens are stored.
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl SingleUseTokenRepository for MemorySingleUseTokenRepository {
    async fn create(&self, purpose: TokenPurpose, user_id: UserId) -> AppResult<SingleUseToken> {
        self.insert(SingleUseToken::issue(purpose, user_id)).await
    }

    async fn find_by_value(
        &self,
        purpose: TokenPurpose,
        value: &str,
    ) -> AppResult<Option<SingleUseToken>> {
        Ok(self
            .tokens
            .read()
            .await
            .get(&(purpose, value.to_string()))
            .cloned())
    }

    async fn delete_by_value(&self, purpose: TokenPurpose, value: &str) -> AppResult<u64> {
        let removed = self
            .tokens
            .write()
            .await
            .remove(&(purpose, value.to_string()));
        Ok(u64::from(removed.is_some()))
    }

    async fn delete_by_owner_and_value(
        &self,
        purpose: TokenPurpose,
        user_id: UserId,
        value: &str,
    ) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let key = (purpose, value.to_string());
        match tokens.get(&key) {
            Some(token) if token.user_id == user_id => {
                tokens.remove(&key);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
