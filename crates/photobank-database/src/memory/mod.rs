//! In-memory repository implementations guarded by Tokio read-write locks.
//!
//! Suitable for tests and single-process embedding. Every operation takes
//! the lock once, so each call is atomic with respect to the others.

pub mod profile;
pub mod token;
pub mod user;

pub use profile::MemoryProfileRepository;
pub use token::MemorySingleUseTokenRepository;
pub use user::MemoryUserRepository;
