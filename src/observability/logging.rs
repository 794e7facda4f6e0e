//! # Structured Logging
//!
//! Provides structured logging setup and span macros using the tracing
//! ecosystem. The translation driver is expected to call [`init_tracing`]
//! once at startup; every reconciliation pass then runs inside a
//! `translation_span!` so that all status mutations, filter ordering
//! decisions, and hook calls carry the same pass id.

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The log level comes from `RUST_LOG` when set, falling back to the
/// configured level. Returns an error if a subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| Error::config(format!("Invalid log level filter: {}", e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json_logs {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| Error::config(format!("Failed to initialize tracing: {}", e)))
}

/// Create a tracing span for one gateway translation pass
#[macro_export]
macro_rules! translation_span {
    ($gateway:expr) => {
        tracing::info_span!(
            "translation_pass",
            gateway = %$gateway,
            pass_id = %uuid::Uuid::new_v4()
        )
    };
    ($gateway:expr, $($field:tt)*) => {
        tracing::info_span!(
            "translation_pass",
            gateway = %$gateway,
            pass_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Create a tracing span for one extension hook invocation
#[macro_export]
macro_rules! hook_span {
    ($hook:expr) => {
        tracing::debug_span!(
            "extension_hook",
            hook = %$hook,
            call_id = %uuid::Uuid::new_v4()
        )
    };
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::AppConfig) {
    tracing::info!(
        service_name = %config.observability.service_name,
        log_level = %config.observability.log_level,
        extension_enabled = config.extension.endpoint.is_some(),
        extension_timeout_seconds = config.extension.timeout_seconds,
        "Gatewayplane translation core configuration"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_compile() {
        let _span = translation_span!("default/gateway-1");
        let _span = translation_span!("default/gateway-1", listeners = 2);
        let _span = hook_span!("post_route_modify");
    }

    #[test]
    fn test_log_config_info() {
        let config = crate::config::AppConfig::default();

        // This should not panic
        log_config_info(&config);
    }
}
