//! # Observability Infrastructure
//!
//! This module provides observability for the Gatewayplane translation core:
//! structured logging via the tracing ecosystem and per-pass span helpers.

pub mod logging;

pub use logging::{init_tracing, log_config_info};
