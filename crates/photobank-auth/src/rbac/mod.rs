//! Role gate for role-restricted operations.

pub mod gate;

pub use gate::{authorize, require_role};
