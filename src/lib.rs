//! # Gatewayplane
//!
//! Gatewayplane is the translation core of a gateway control plane: it turns
//! declarative networking resources (gateways, listeners, routes, policies)
//! into an abstract proxy configuration, one reconciliation pass at a time.
//!
//! ## Architecture
//!
//! ```text
//! Resource Snapshot → Listener Context Model → Filter Chain Assembly
//!                                                      ↓
//!                     Translation Driver  ←  Extension Hook Client
//! ```
//!
//! ## Core Components
//!
//! - **Listener Context Model** ([`gateway`]): per-pass view of a gateway and
//!   its listeners, with status rebuilt from scratch on every pass
//! - **Filter Chain Assembler** ([`xds::filters`]): deterministic ordering of a
//!   route's HTTP filter chain, merging a fixed default precedence with
//!   user-supplied relative-ordering constraints
//! - **Extension Hook Client** ([`extension`]): four injection points where an
//!   externally-implemented service may rewrite a configuration fragment
//!
//! The surrounding control plane (resource watching, status persistence,
//! manifest rendering, the proxy wire protocol) lives outside this crate; the
//! translation driver hands in an immutable [`gateway::ResourceSnapshot`] and
//! reads back status and configuration fragments.
//!
//! ## Example Usage
//!
//! ```rust
//! use gatewayplane::gateway::{Gateway, GatewayContext, ResourceSnapshot};
//!
//! let snapshot = ResourceSnapshot::default();
//! let mut ctx = GatewayContext::new(Gateway {
//!     namespace: "default".into(),
//!     name: "gateway-1".into(),
//!     listeners: vec![],
//! });
//! ctx.reset_listeners(&snapshot);
//! assert!(ctx.status().listeners.is_empty());
//! ```

pub mod config;
pub mod errors;
pub mod extension;
pub mod gateway;
pub mod observability;
pub mod xds;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{Error, Result};
pub use observability::init_tracing;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
