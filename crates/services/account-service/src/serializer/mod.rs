//! Request serializers: payload validation and mapping onto collaborators.

mod account_serializer;
mod credential_validator;
mod fields;

pub use account_serializer::AccountSerializer;
pub use credential_validator::CredentialValidator;
