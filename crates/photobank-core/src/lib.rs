//! # photobank-core
//!
//! Core crate for the Photobank identity backend. Contains the unified
//! error system, configuration schemas, typed identifiers, and the
//! collaborator traits that do not depend on domain entities.
//!
//! This crate has **no** internal dependencies on other Photobank crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
