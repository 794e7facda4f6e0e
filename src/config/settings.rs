//! # Configuration Settings
//!
//! Defines the configuration structure for the Gatewayplane translation core.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// Extension hook configuration
    #[validate(nested)]
    pub extension: ExtensionConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let extension = ExtensionConfig {
            endpoint: std::env::var("GATEWAYPLANE_EXTENSION_ENDPOINT").ok(),
            timeout_seconds: std::env::var("GATEWAYPLANE_EXTENSION_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|e| Error::config(format!("Invalid extension timeout: {}", e)))?,
        };

        let observability = ObservabilityConfig {
            log_level: std::env::var("GATEWAYPLANE_LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string()),
            json_logs: std::env::var("GATEWAYPLANE_JSON_LOGS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            service_name: std::env::var("GATEWAYPLANE_SERVICE_NAME")
                .unwrap_or_else(|_| "gatewayplane".to_string()),
        };

        let config = Self { extension, observability };
        config.validate_all()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        // Use validator crate for basic validation
        Validate::validate(self).map_err(Error::from)?;

        // Custom validation logic
        self.extension.validate_endpoint()?;

        Ok(())
    }
}

/// Extension hook service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtensionConfig {
    /// Base URL of the extension hook service. Hooks are disabled when unset.
    pub endpoint: Option<String>,

    /// Per-call timeout in seconds
    #[validate(range(
        min = 1,
        max = 300,
        message = "Timeout must be between 1 and 300 seconds"
    ))]
    pub timeout_seconds: u64,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self { endpoint: None, timeout_seconds: 5 }
    }
}

impl ExtensionConfig {
    /// Get the per-call timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Check that the endpoint, when set, is a well-formed http(s) URL
    pub fn validate_endpoint(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| Error::validation(format!("Invalid extension endpoint: {}", e)))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(Error::validation(
                    "Extension endpoint must use the http or https scheme",
                ));
            }
        }
        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Log level filter (e.g. "info", "gatewayplane=debug")
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable text
    pub json_logs: bool,

    /// Service name reported in logs
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "gatewayplane".to_string(),
        }
    }
}
