//! Stateless role checks.

use photobank_core::error::AppError;
use photobank_entity::user::UserRole;

/// Returns whether `role` satisfies `required`.
///
/// An empty requirement admits every role; otherwise the role must be
/// listed. There is no hierarchy: `ADMIN` does not imply `USER`.
pub fn authorize(required: &[UserRole], role: UserRole) -> bool {
    required.is_empty() || required.contains(&role)
}

/// Like [`authorize`], failing with `Forbidden` on rejection.
pub fn require_role(required: &[UserRole], role: UserRole) -> Result<(), AppError> {
    if authorize(required, role) {
        Ok(())
    } else {
        tracing::debug!(%role, ?required, "Role gate rejected request");
        Err(AppError::forbidden(format!(
            "Role '{role}' is not permitted to perform this operation"
        )))
    }
}
