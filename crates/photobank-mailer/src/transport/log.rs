//! Transport that writes messages to the tracing log.

use async_trait::async_trait;
use tracing::{debug, info};

use photobank_core::config::MailerConfig;
use photobank_core::result::AppResult;
use photobank_core::traits::{MailDispatcher, MailMessage};

/// Development transport: every message is logged and reported as
/// delivered. Headers go out at `info`; the body carries single-use token
/// values and is only emitted at `debug`.
#[derive(Debug, Clone)]
pub struct LogTransport {
    from: String,
}

impl LogTransport {
    /// Creates a transport stamping the configured sender on each message.
    pub fn new(config: &MailerConfig) -> Self {
        Self {
            from: config.from_header(),
        }
    }

    /// The `From` header value used for every message.
    pub fn from_header(&self) -> &str {
        &self.from
    }
}

#[async_trait]
impl MailDispatcher for LogTransport {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            "Outbound mail"
        );
        debug!(to = %message.to, body = %message.body, "Outbound mail body");
        Ok(())
    }
}
