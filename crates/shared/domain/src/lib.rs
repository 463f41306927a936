//! Domain layer - Account entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod account;
pub mod constants;
pub mod error;
pub mod password;

pub use account::{
    AccountChanges, AccountFields, AccountPayload, AccountRecord, AccountResponse,
    CredentialAttempt, Credentials,
};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{check_strength, Password, DUMMY_PASSWORD_HASH};
