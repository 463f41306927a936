//! Credential verification.

mod auth_backend;

pub use auth_backend::{AuthBackend, RequestContext, StoreAuthenticator};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_backend::MockAuthBackend;
