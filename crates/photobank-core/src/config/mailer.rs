//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Sender identity stamped on every outbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    /// Display name of the sender.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    /// Sender mailbox address.
    #[serde(default = "default_sender_address")]
    pub sender_address: String,
}

impl MailerConfig {
    /// Formats the `From` header value, e.g. `"Photobank" <noreply@photobank.local>`.
    pub fn from_header(&self) -> String {
        format!("\"{}\" <{}>", self.sender_name, self.sender_address)
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            sender_name: default_sender_name(),
            sender_address: default_sender_address(),
        }
    }
}

fn default_sender_name() -> String {
    "Photobank".to_string()
}

fn default_sender_address() -> String {
    "noreply@photobank.local".to_string()
}
