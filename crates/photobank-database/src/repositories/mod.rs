//! Repository contracts and their PostgreSQL implementations.

pub mod profile;
pub mod token;
pub mod user;

pub use profile::{PgProfileRepository, ProfileRepository};
pub use token::{PgSingleUseTokenRepository, SingleUseTokenRepository};
pub use user::{PgUserRepository, UserRepository};

use photobank_core::error::{AppError, ErrorKind};

/// Maps a write failure, turning unique-constraint violations into `Conflict`.
pub(crate) fn map_write_error(
    context: &'static str,
    conflict: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let unique = matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
        if unique {
            AppError::conflict(conflict)
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}
