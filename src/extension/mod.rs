//! # Extension Hooks
//!
//! Four injection points during translation where an externally-implemented
//! service may inspect and replace a configuration fragment:
//!
//! | Hook | Fragment |
//! |---|---|
//! | post-route-modify | one route |
//! | post-virtual-host-modify | one virtual host |
//! | post-listener-modify | one listener's generated configuration |
//! | post-translate-modify | the full set of clusters and secrets |
//!
//! Each hook is one synchronous request/response round trip; a hook that
//! wants "no change" returns its input unmodified. Policy-derived resources
//! cross the boundary as opaque byte payloads, never as typed domain
//! objects, so the protocol stays stable as internal types evolve.

pub mod client;
pub mod http;
pub mod types;

pub use client::{ExtensionService, XdsHookClient};
pub use http::HttpExtensionService;
pub use types::{encode_resources, ExtensionResource};
