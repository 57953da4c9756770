//! # photobank-entity
//!
//! Domain entity models for the Photobank identity backend. Every struct in
//! this crate represents a database table row or a domain value object.
//! Database entities additionally derive `sqlx::FromRow`.

pub mod profile;
pub mod token;
pub mod user;
