//! Input checks shared by the account and admin services.

use validator::Validate;

use photobank_core::error::AppError;
use photobank_core::result::AppResult;

/// Fails with `MissingInput` when `value` is empty or whitespace.
pub(crate) fn require_present(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::missing_input(format!("Missing {field}")));
    }
    Ok(())
}

/// Runs the derived validator rules, reporting the first message.
pub(crate) fn validate<T: Validate>(value: &T) -> AppResult<()> {
    value.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());
        AppError::validation(message)
    })
}
