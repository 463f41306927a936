//! Account Service Library
//!
//! Validation and mapping for user-account payloads:
//! - [`serializer::AccountSerializer`] validates account create/update
//!   payloads and hands them to an [`repository::AccountStore`].
//! - [`serializer::CredentialValidator`] checks login credentials through an
//!   [`auth::AuthBackend`].

pub mod auth;
pub mod config;
pub mod repository;
pub mod serializer;

use std::sync::Arc;

use tracing::info;

use common::AppResult;

use crate::auth::StoreAuthenticator;
use crate::config::AccountServiceConfig;
use crate::repository::InMemoryAccountStore;
use crate::serializer::{AccountSerializer, CredentialValidator};

/// Serializers wired to an in-memory store.
pub struct AccountService {
    pub store: Arc<InMemoryAccountStore>,
    pub accounts: AccountSerializer,
    pub credentials: CredentialValidator,
}

impl AccountService {
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryAccountStore::new());
        let accounts = AccountSerializer::new(store.clone());
        let backend = Arc::new(StoreAuthenticator::new(store.clone()));
        let credentials = CredentialValidator::new(backend);

        Self {
            store,
            accounts,
            credentials,
        }
    }

    /// Build the service and create the configured seed account, if any.
    pub async fn from_config(config: &AccountServiceConfig) -> AppResult<Self> {
        let service = Self::in_memory();

        if let Some(seed) = config.seed_account.clone() {
            let account = service.accounts.create(seed.into()).await?;
            info!("Seeded account {}", account.email);
        }

        Ok(service)
    }
}
