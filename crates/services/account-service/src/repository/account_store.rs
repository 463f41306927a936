//! Account store contract and an in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{AccountFields, AccountRecord, Password, MSG_EMAIL_REQUIRED};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account storage primitives used by the serializers.
///
/// Hashing and email uniqueness are the store's job.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create and save an account, hashing `password`
    async fn create_user(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> AppResult<AccountRecord>;

    /// Apply plain (non-password) fields to `account` and save it
    async fn update_fields(
        &self,
        account: AccountRecord,
        fields: AccountFields,
    ) -> AppResult<AccountRecord>;

    /// Hash `raw_password` onto `account`. Does not save.
    async fn set_password(
        &self,
        account: AccountRecord,
        raw_password: String,
    ) -> AppResult<AccountRecord>;

    /// Save `account` as it is
    async fn persist(&self, account: &AccountRecord) -> AppResult<()>;

    /// Find account by exact email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AccountRecord>>;
}

/// Lowercase the domain part of an email address; the local part is kept as
/// given. Surrounding whitespace is removed.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Account store held in process memory, keyed by account id.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Uuid, AccountRecord>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    /// Fetch the stored copy of an account
    pub async fn get(&self, id: Uuid) -> Option<AccountRecord> {
        self.accounts.read().await.get(&id).cloned()
    }

    /// Write `account`, rejecting an email held by another account.
    /// Caller holds the write lock.
    fn save(
        accounts: &mut HashMap<Uuid, AccountRecord>,
        account: AccountRecord,
    ) -> AppResult<()> {
        let taken = accounts
            .values()
            .any(|other| other.id != account.id && other.email == account.email);
        if taken {
            return Err(AppError::conflict("Email"));
        }

        accounts.insert(account.id, account);
        Ok(())
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create_user(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> AppResult<AccountRecord> {
        if email.trim().is_empty() {
            return Err(AppError::validation(MSG_EMAIL_REQUIRED));
        }

        let password_hash = Password::new(&password)?.into_string();
        let account =
            AccountRecord::new(Uuid::new_v4(), normalize_email(&email), password_hash, name);

        let mut accounts = self.accounts.write().await;
        Self::save(&mut accounts, account.clone())?;

        debug!("Stored account {}", account.id);
        Ok(account)
    }

    async fn update_fields(
        &self,
        mut account: AccountRecord,
        fields: AccountFields,
    ) -> AppResult<AccountRecord> {
        let mut accounts = self.accounts.write().await;
        accounts.get(&account.id).ok_or_not_found()?;

        if let Some(email) = fields.email {
            account.email = normalize_email(&email);
        }
        if let Some(name) = fields.name {
            account.name = name;
        }
        account.touch();

        Self::save(&mut accounts, account.clone())?;
        Ok(account)
    }

    async fn set_password(
        &self,
        mut account: AccountRecord,
        raw_password: String,
    ) -> AppResult<AccountRecord> {
        account.password_hash = Password::new(&raw_password)?.into_string();
        account.touch();
        Ok(account)
    }

    async fn persist(&self, account: &AccountRecord) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        accounts.get(&account.id).ok_or_not_found()?;

        Self::save(&mut accounts, account.clone())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<AccountRecord>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }
}
