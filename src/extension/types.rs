//! Extension hook request/response messages.
//!
//! These are the shapes that cross the hook boundary. Fragment fields reuse
//! the abstract proxy configuration types; policy-derived context travels as
//! [`ExtensionResource`] byte payloads produced by [`encode_resources`].

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::xds::filters::Base64Bytes;
use crate::xds::resources::{ClusterConfig, ListenerConfig, RouteRule, SecretConfig, VirtualHostConfig};

/// One opaque policy-derived resource, byte-encoded for transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionResource {
    pub unstructured_bytes: Base64Bytes,
}

/// Encode policy-derived resources into opaque byte payloads.
///
/// This is the single encode step of the hook protocol; a resource that
/// cannot be encoded fails the whole batch, and the caller skips the hook
/// invocation for that fragment.
pub fn encode_resources<T: Serialize>(resources: &[T]) -> Result<Vec<ExtensionResource>> {
    resources
        .iter()
        .map(|resource| {
            serde_json::to_vec(resource)
                .map(|bytes| ExtensionResource { unstructured_bytes: Base64Bytes(bytes) })
                .map_err(|e| Error::serialization(e, "encoding extension resource"))
        })
        .collect()
}

/// Request for the post-route-modify hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRouteModifyRequest {
    pub route: RouteRule,
    /// Hostnames the route was matched under
    #[serde(default)]
    pub hostnames: Vec<String>,
    #[serde(default)]
    pub extension_resources: Vec<ExtensionResource>,
}

/// Response carrying the replacement route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRouteModifyResponse {
    pub route: RouteRule,
}

/// Request for the post-virtual-host-modify hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostVirtualHostModifyRequest {
    pub virtual_host: VirtualHostConfig,
}

/// Response carrying the replacement virtual host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostVirtualHostModifyResponse {
    pub virtual_host: VirtualHostConfig,
}

/// Request for the post-listener-modify hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostListenerModifyRequest {
    pub listener: ListenerConfig,
    #[serde(default)]
    pub extension_resources: Vec<ExtensionResource>,
}

/// Response carrying the replacement listener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostListenerModifyResponse {
    pub listener: ListenerConfig,
}

/// Request for the post-translate-modify hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostTranslateModifyRequest {
    #[serde(default)]
    pub clusters: Vec<ClusterConfig>,
    #[serde(default)]
    pub secrets: Vec<SecretConfig>,
}

/// Response carrying the replacement clusters and secrets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostTranslateModifyResponse {
    #[serde(default)]
    pub clusters: Vec<ClusterConfig>,
    #[serde(default)]
    pub secrets: Vec<SecretConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::resources::PolicyResource;

    #[test]
    fn encode_resources_produces_json_payloads() {
        let resources = vec![PolicyResource {
            kind: "SecurityPolicy".into(),
            namespace: "default".into(),
            name: "policy-1".into(),
            spec: serde_json::json!({"jwt": {"issuer": "https://idp.example.com"}}),
        }];

        let encoded = encode_resources(&resources).expect("encode");
        assert_eq!(encoded.len(), 1);

        let decoded: PolicyResource =
            serde_json::from_slice(&encoded[0].unstructured_bytes.0).expect("decode");
        assert_eq!(decoded, resources[0]);
    }

    #[test]
    fn encode_resources_empty_input() {
        let encoded = encode_resources::<PolicyResource>(&[]).expect("encode");
        assert!(encoded.is_empty());
    }
}
