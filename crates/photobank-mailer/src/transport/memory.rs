//! In-memory mailbox that records every message it is handed.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use photobank_core::error::AppError;
use photobank_core::result::AppResult;
use photobank_core::traits::{MailDispatcher, MailMessage};

/// Captures messages instead of delivering them.
///
/// A mailbox built with [`MemoryMailbox::failing`] still records each
/// attempt but reports every send as an `ExternalService` failure.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailbox {
    messages: Arc<RwLock<Vec<MailMessage>>>,
    fail: bool,
}

impl MemoryMailbox {
    /// Creates an empty mailbox that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailbox whose sends always fail.
    pub fn failing() -> Self {
        Self {
            messages: Arc::default(),
            fail: true,
        }
    }

    /// Snapshot of everything sent so far, oldest first.
    pub async fn messages(&self) -> Vec<MailMessage> {
        self.messages.read().await.clone()
    }

    /// Messages addressed to `to`, oldest first.
    pub async fn messages_to(&self, to: &str) -> Vec<MailMessage> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.to == to)
            .cloned()
            .collect()
    }

    /// Number of messages recorded.
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Whether nothing has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[async_trait]
impl MailDispatcher for MemoryMailbox {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.messages.write().await.push(message.clone());
        if self.fail {
            return Err(AppError::external_service(format!(
                "Mail delivery to {} refused",
                message.to
            )));
        }
        Ok(())
    }
}
