//! Password hashing and policy enforcement.

pub mod hasher;
pub mod policy;

pub use hasher::PasswordHasher;
pub use policy::{PASSWORD_MIN_LENGTH, PasswordPolicy};
