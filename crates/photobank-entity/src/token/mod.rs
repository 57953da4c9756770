//! Single-use token entities for email confirmation and password reset.

pub mod model;
pub mod purpose;

pub use model::{SINGLE_USE_TOKEN_LENGTH, SingleUseToken, generate_token_value};
pub use purpose::TokenPurpose;
