//! # photobank-database
//!
//! Repository contracts consumed by the identity services, with two
//! implementations of each: PostgreSQL (sqlx) for deployments and
//! in-memory for tests and embedding.

pub mod connection;
pub mod memory;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::{MemoryProfileRepository, MemorySingleUseTokenRepository, MemoryUserRepository};
pub use repositories::{
    PgProfileRepository, PgSingleUseTokenRepository, PgUserRepository, ProfileRepository,
    SingleUseTokenRepository, UserRepository,
};
