//! Authentication backend contract and a store-backed implementation.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use common::AppResult;
use domain::{AccountRecord, Password, DUMMY_PASSWORD_HASH};

use crate::repository::AccountStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Request metadata handed through to the authentication backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub remote_addr: Option<IpAddr>,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh context tagged with a random request id.
    pub fn generate() -> Self {
        Self::new().with_request_id(Uuid::new_v4().to_string())
    }

    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

/// Verifies an email/password pair.
///
/// `Ok(None)` means the pair did not resolve to a usable account, whatever
/// the reason.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        context: &RequestContext,
    ) -> AppResult<Option<AccountRecord>>;
}

/// Authenticates against an [`AccountStore`] by checking the stored hash.
pub struct StoreAuthenticator {
    store: Arc<dyn AccountStore>,
}

impl StoreAuthenticator {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthBackend for StoreAuthenticator {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        context: &RequestContext,
    ) -> AppResult<Option<AccountRecord>> {
        let account = self.store.find_by_email(email).await?;

        // Hash even on a miss so unknown emails take as long as known ones
        let hash = account
            .as_ref()
            .map(|a| a.password_hash.as_str())
            .unwrap_or(DUMMY_PASSWORD_HASH);
        let password_valid = Password::from_hash(hash).verify(password);

        match account {
            Some(account) if password_valid && account.is_active => Ok(Some(account)),
            _ => {
                debug!(
                    request_id = context.request_id.as_deref().unwrap_or("-"),
                    "Credentials did not resolve to an active account"
                );
                Ok(None)
            }
        }
    }
}
