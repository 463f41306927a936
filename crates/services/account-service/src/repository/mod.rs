//! Repository layer for account storage.

mod account_store;

pub use account_store::{normalize_email, AccountStore, InMemoryAccountStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_store::MockAccountStore;
