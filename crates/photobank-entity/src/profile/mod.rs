//! User profile entities.

pub mod model;

pub use model::{Profile, UpdateProfile};
