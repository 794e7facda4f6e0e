//! Abstract proxy configuration resources.
//!
//! High-level representations of the configuration fragments translation
//! produces. These are the fragment shapes that cross the extension hook
//! boundary; a hook receives one of them and returns a replacement of the
//! same shape.

use serde::{Deserialize, Serialize};

use crate::xds::filters::HttpFilter;

/// One route rule mapping matched traffic to an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRule {
    #[serde(default)]
    pub name: Option<String>,
    pub r#match: RouteMatchConfig,
    pub action: RouteActionConfig,
}

/// Route matching criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMatchConfig {
    pub path: PathMatch,
    #[serde(default)]
    pub headers: Vec<HeaderMatchConfig>,
}

/// Path matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathMatch {
    Exact(String),
    Prefix(String),
    Regex(String),
}

/// Header matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderMatchConfig {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Route actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteActionConfig {
    Cluster {
        name: String,
        /// Upstream timeout in seconds
        timeout: Option<u64>,
    },
    Redirect {
        host_redirect: Option<String>,
        response_code: Option<u32>,
    },
}

/// A group of routes served under shared hostnames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualHostConfig {
    pub name: String,
    pub domains: Vec<String>,
    pub routes: Vec<RouteRule>,
}

/// One listener's generated configuration, including its ordered HTTP filter
/// chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerConfig {
    pub name: String,
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub http_filters: Vec<HttpFilter>,
    #[serde(default)]
    pub virtual_hosts: Vec<VirtualHostConfig>,
}

/// A backend cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

/// One upstream endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
}

/// A TLS secret. Key material is carried as opaque references; the core
/// never reads certificate contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretConfig {
    pub name: String,
    #[serde(default)]
    pub certificate_chain: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}
