//! Account serializer - maps account payloads onto the account store.
//!
//! Inbound payloads carry `email`, `password` and `name`. Outbound
//! representations carry `email` and `name` only; the password is write-only.

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use common::AppResult;
use domain::{
    check_strength, AccountChanges, AccountFields, AccountPayload, AccountRecord, AccountResponse,
};

use super::fields::{check_field, require_not_blank};
use crate::repository::AccountStore;

/// Serializer for account create and update requests.
pub struct AccountSerializer {
    store: Arc<dyn AccountStore>,
}

impl AccountSerializer {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Check password strength.
    ///
    /// Rejects blank and short (< 5 characters) passwords, then requires a
    /// digit, an uppercase letter, a lowercase letter and a special
    /// character, in that order. Returns the candidate untouched.
    pub fn validate_password(candidate: &str) -> AppResult<&str> {
        Ok(check_strength(candidate)?)
    }

    /// Outbound representation of an account
    pub fn to_representation(account: &AccountRecord) -> AccountResponse {
        AccountResponse::from(account)
    }

    /// Validate a creation payload. Email and name are trimmed; the password
    /// is not.
    pub fn validate_payload(payload: AccountPayload) -> AppResult<AccountPayload> {
        let payload = AccountPayload {
            email: payload.email.trim().to_string(),
            password: payload.password,
            name: payload.name.map(|name| name.trim().to_string()),
        };

        let errors = payload.validate().err();

        require_not_blank(&payload.email)?;
        check_field(errors.as_ref(), "email")?;
        Self::validate_password(&payload.password)?;
        check_field(errors.as_ref(), "name")?;

        Ok(payload)
    }

    /// Validate an update payload. Only present fields are checked.
    pub fn validate_changes(changes: AccountChanges) -> AppResult<AccountChanges> {
        let changes = AccountChanges {
            email: changes.email.map(|email| email.trim().to_string()),
            password: changes.password,
            name: changes.name.map(|name| name.trim().to_string()),
        };

        let errors = changes.validate().err();

        if let Some(email) = &changes.email {
            require_not_blank(email)?;
        }
        check_field(errors.as_ref(), "email")?;
        if let Some(password) = &changes.password {
            Self::validate_password(password)?;
        }
        check_field(errors.as_ref(), "name")?;

        Ok(changes)
    }

    /// Validate and create a new account. Store failures are returned as is.
    pub async fn create(&self, payload: AccountPayload) -> AppResult<AccountRecord> {
        let payload = Self::validate_payload(payload)?;

        debug!("Creating account for {}", payload.email);
        let account = self
            .store
            .create_user(
                payload.email,
                payload.password,
                payload.name.unwrap_or_default(),
            )
            .await?;

        info!("Created account {}", account.id);
        Ok(account)
    }

    /// Validate and apply `changes` to `existing`.
    ///
    /// Plain fields go through a single field update. A new password is
    /// hashed onto the updated account and saved separately.
    pub async fn update(
        &self,
        existing: AccountRecord,
        changes: AccountChanges,
    ) -> AppResult<AccountRecord> {
        let changes = Self::validate_changes(changes)?;

        let fields = AccountFields {
            email: changes.email,
            name: changes.name,
        };
        let account = self.store.update_fields(existing, fields).await?;

        match changes.password {
            Some(password) => {
                debug!("Setting new password for account {}", account.id);
                let account = self.store.set_password(account, password).await?;
                self.store.persist(&account).await?;
                Ok(account)
            }
            None => Ok(account),
        }
    }
}
