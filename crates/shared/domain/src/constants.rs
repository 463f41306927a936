//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Field limits
// =============================================================================

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 5;

// =============================================================================
// Validation messages
// =============================================================================

pub const MSG_PASSWORD_MISSING_DIGIT: &str = "Password must contain at least one digit.";
pub const MSG_PASSWORD_MISSING_UPPERCASE: &str =
    "Password must contain at least one uppercase letter.";
pub const MSG_PASSWORD_MISSING_LOWERCASE: &str =
    "Password must contain at least one lowercase letter.";
pub const MSG_PASSWORD_MISSING_SPECIAL: &str =
    "Password must contain at least one special character.";

/// Message for a field that is present but empty
pub const MSG_FIELD_BLANK: &str = "This field may not be blank.";

/// Message for a malformed email address
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";

/// Raised by the store when an account is created without an email
pub const MSG_EMAIL_REQUIRED: &str = "User must have an email address.";

/// Login failure message, identical for every cause of failure
pub const MSG_UNABLE_TO_AUTHENTICATE: &str = "Unable to authenticate with provided credentials.";

/// Message for a field shorter than `min` characters
pub fn msg_too_short(min: usize) -> String {
    format!("Ensure this field has at least {} characters.", min)
}

// =============================================================================
// Error codes
// =============================================================================

/// Code attached to field-level validation failures
pub const CODE_INVALID: &str = "invalid";

/// Code attached to failed authentication
pub const CODE_AUTHORIZATION: &str = "authorization";
