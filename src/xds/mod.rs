//! # Proxy Configuration Model
//!
//! Abstract resource graph produced by translation: listeners, virtual hosts,
//! routes, clusters, and secrets, plus the HTTP filter chain machinery. This
//! is the shape consumed by extension hooks and handed back to the
//! translation driver; serializing it into the proxy's wire protocol happens
//! outside this crate.

pub mod filters;
pub mod resources;

pub use resources::{
    ClusterConfig, EndpointConfig, ListenerConfig, PathMatch, RouteActionConfig, RouteMatchConfig,
    RouteRule, SecretConfig, VirtualHostConfig,
};
