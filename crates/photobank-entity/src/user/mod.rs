//! User domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, PublicUser, UpdateUser, User};
pub use role::UserRole;
