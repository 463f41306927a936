//! Account entity and the payloads that cross the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Persisted user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRecord {
    /// Create a new active account
    pub fn new(id: Uuid, email: String, password_hash: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            password_hash,
            name,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the account as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Disable the account; authentication rejects inactive accounts
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }
}

/// Account creation input
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountPayload {
    /// Email address, also the login identifier
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub email: String,
    /// Raw password; write-only
    pub password: String,
    /// Display name
    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
}

/// Partial account update input
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountChanges {
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub email: Option<String>,
    /// New raw password; hashed by the store
    pub password: Option<String>,
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
}

/// Non-password fields applied by a generic field update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFields {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl AccountFields {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none()
    }
}

/// Account as returned to clients. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountResponse {
    pub email: String,
    pub name: String,
}

impl From<AccountRecord> for AccountResponse {
    fn from(account: AccountRecord) -> Self {
        Self {
            email: account.email,
            name: account.name,
        }
    }
}

impl From<&AccountRecord> for AccountResponse {
    fn from(account: &AccountRecord) -> Self {
        Self {
            email: account.email.clone(),
            name: account.name.clone(),
        }
    }
}

/// Login input
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Credentials {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// Taken verbatim; surrounding whitespace is part of the password
    pub password: String,
}

/// Credentials that authenticated, with the account they resolved to
#[derive(Debug, Clone)]
pub struct CredentialAttempt {
    pub email: String,
    pub password: String,
    pub account: AccountRecord,
}
