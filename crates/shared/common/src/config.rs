//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration shared by all services.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Log level, used as the default tracing filter
    pub log_level: String,
}

impl ServiceConfig {
    pub fn new(service_name: impl Into<String>, log_level: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: log_level.into(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            log_level: "info".to_string(),
        }
    }
}
