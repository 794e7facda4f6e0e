//! # Configuration Management
//!
//! This module provides configuration management for the Gatewayplane
//! translation core: extension hook wiring and observability settings.

pub mod settings;

pub use settings::{AppConfig, ExtensionConfig, ObservabilityConfig};
