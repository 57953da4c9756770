//! Credential verification and session token issuance.

pub mod service;

pub use service::{AuthService, LoginResult};
