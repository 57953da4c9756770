//! # photobank-service
//!
//! Business logic for the Photobank identity backend. Each service
//! orchestrates repositories, the credential and token primitives from
//! `photobank-auth`, and the mail outbox.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod auth;
pub mod context;
pub mod profile;
pub mod user;

mod validation;

pub use account::{AccountService, NewAccount};
pub use auth::{AuthService, LoginResult};
pub use context::RequestContext;
pub use profile::ProfileService;
pub use user::{UpdateUserRequest, UserAdminService};
