//! Convenience result type alias for Photobank.

use crate::error::AppError;

/// A specialized `Result` type for Photobank operations.
pub type AppResult<T> = Result<T, AppError>;
