//! Collaborator traits defined in `photobank-core` and implemented by other crates.

pub mod mailer;

pub use mailer::{MailDispatcher, MailMessage};
