//! Account service configuration.

use std::env;

use common::ServiceConfig;
use domain::AccountPayload;

/// Account service configuration.
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Service name and log level
    pub service: ServiceConfig,
    /// Account created in the in-memory store at startup
    pub seed_account: Option<SeedAccount>,
}

/// Startup account read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl From<SeedAccount> for AccountPayload {
    fn from(seed: SeedAccount) -> Self {
        AccountPayload {
            email: seed.email,
            password: seed.password,
            name: seed.name,
        }
    }
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup("ACCOUNT_SERVICE_LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        let seed_account = match (
            lookup("ACCOUNT_SERVICE_SEED_EMAIL"),
            lookup("ACCOUNT_SERVICE_SEED_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(SeedAccount {
                email,
                password,
                name: lookup("ACCOUNT_SERVICE_SEED_NAME"),
            }),
            _ => None,
        };

        Self {
            service: ServiceConfig::new("account-service", log_level),
            seed_account,
        }
    }
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::new("account-service", "info"),
            seed_account: None,
        }
    }
}
