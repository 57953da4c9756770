//! Mail dispatcher trait for pluggable outbound mail transports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A plain-text message addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl MailMessage {
    /// Builds a message.
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Trait for outbound mail transports.
///
/// Implementations report delivery failures as `ExternalService` errors.
/// Callers in the account lifecycle never await this directly; they go
/// through a fire-and-forget outbox that only logs the outcome.
#[async_trait]
pub trait MailDispatcher: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a single message.
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}
