//! # photobank-auth
//!
//! Credential and token primitives for the Photobank identity backend.
//!
//! ## Modules
//!
//! - `password` — Argon2id hashing/verification and the minimum-length policy
//! - `jwt` — signed, expiring access and refresh tokens
//! - `rbac` — the stateless role gate

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{AccessClaims, ClaimSet, IssuedToken, RefreshClaims, TokenSigner, VerifiedToken};
pub use password::{PasswordHasher, PasswordPolicy};
pub use rbac::{authorize, require_role};
