//! # photobank-mailer
//!
//! Mail delivery for account lifecycle messages.
//!
//! - [`MailOutbox`] accepts messages without blocking the caller and
//!   delivers them on background tasks. Failures are logged, never returned.
//! - [`LogTransport`] writes messages to the tracing log.
//! - [`MemoryMailbox`] captures messages in memory for tests and tooling.

pub mod outbox;
pub mod transport;

pub use outbox::MailOutbox;
pub use transport::{LogTransport, MemoryMailbox};
