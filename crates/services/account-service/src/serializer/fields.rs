//! Field-level checks shared by the serializers.

use validator::ValidationErrors;

use common::{AppError, AppResult};
use domain::MSG_FIELD_BLANK;

/// Fail with the first error recorded for `field`, if any.
pub fn check_field(errors: Option<&ValidationErrors>, field: &str) -> AppResult<()> {
    let message = errors
        .and_then(|e| e.field_errors().get(field).and_then(|errs| errs.first()).cloned())
        .map(|error| {
            error
                .message
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}.", field))
        });

    match message {
        Some(message) => Err(AppError::validation(message)),
        None => Ok(()),
    }
}

/// Fail when a required string field is empty.
pub fn require_not_blank(value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::validation(MSG_FIELD_BLANK));
    }
    Ok(())
}
