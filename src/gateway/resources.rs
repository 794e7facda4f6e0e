//! Input resource types for one reconciliation pass.
//!
//! These are the declarative networking resources the translation driver
//! hands to the core as an already-materialized snapshot. The core only
//! reads them; watching, caching, and status write-back belong to external
//! collaborators.

use serde::{Deserialize, Serialize};

/// Immutable bundle of all input objects visible to one reconciliation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub gateway_class: Option<GatewayClass>,
    #[serde(default)]
    pub gateways: Vec<Gateway>,
    #[serde(default)]
    pub routes: Vec<HttpRouteSpec>,
    #[serde(default)]
    pub policies: Vec<PolicyResource>,
}

/// The gateway class all gateways in a snapshot belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayClass {
    pub name: String,
    #[serde(default)]
    pub controller_name: String,
}

/// A gateway: a named set of listeners accepting traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    pub namespace: String,
    pub name: String,
    /// Declared listeners, in spec order. Never mutated by the core.
    #[serde(default)]
    pub listeners: Vec<ListenerSpec>,
}

impl Gateway {
    /// `namespace/name` key used in logs and spans
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// One bind point declared under a gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerSpec {
    pub name: String,
    #[serde(default)]
    pub protocol: ListenerProtocol,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub hostname: Option<String>,
}

/// Listener protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListenerProtocol {
    #[default]
    Http,
    Https,
    Tls,
    Tcp,
    Udp,
}

/// Group/kind pair identifying a route type a listener may accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteGroupKind {
    #[serde(default)]
    pub group: Option<String>,
    pub kind: String,
}

/// A route rule mapping matched traffic to a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRouteSpec {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub hostnames: Vec<String>,
    /// Gateways (and optionally specific listeners) this route attaches to
    #[serde(default)]
    pub parent_refs: Vec<ParentRef>,
}

/// Reference from a route to a gateway, optionally narrowed to one listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    /// Defaults to the route's own namespace when unset
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    /// Listener name; unset means the route attaches to every listener
    #[serde(default)]
    pub section_name: Option<String>,
}

impl ParentRef {
    /// Whether this reference targets the given gateway listener.
    ///
    /// `route_namespace` supplies the default when the reference carries none.
    pub fn targets(&self, route_namespace: &str, gateway: &Gateway, listener_name: &str) -> bool {
        let namespace = self.namespace.as_deref().unwrap_or(route_namespace);
        namespace == gateway.namespace
            && self.name == gateway.name
            && self.section_name.as_deref().map(|s| s == listener_name).unwrap_or(true)
    }
}

/// An opaque policy-derived resource, as produced by attachment resolution.
///
/// The core never interprets `spec`; it is forwarded byte-encoded to
/// extension hooks (see [`crate::extension`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResource {
    pub kind: String,
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub spec: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> Gateway {
        Gateway {
            namespace: "default".into(),
            name: "gateway-1".into(),
            listeners: vec![ListenerSpec {
                name: "http".into(),
                protocol: ListenerProtocol::Http,
                port: 80,
                hostname: None,
            }],
        }
    }

    #[test]
    fn parent_ref_targets_all_listeners_without_section_name() {
        let pref = ParentRef { namespace: None, name: "gateway-1".into(), section_name: None };
        assert!(pref.targets("default", &gateway(), "http"));
        assert!(pref.targets("default", &gateway(), "https"));
    }

    #[test]
    fn parent_ref_section_name_narrows_to_one_listener() {
        let pref = ParentRef {
            namespace: None,
            name: "gateway-1".into(),
            section_name: Some("http".into()),
        };
        assert!(pref.targets("default", &gateway(), "http"));
        assert!(!pref.targets("default", &gateway(), "https"));
    }

    #[test]
    fn parent_ref_namespace_defaults_to_route_namespace() {
        let pref = ParentRef { namespace: None, name: "gateway-1".into(), section_name: None };
        assert!(!pref.targets("other-ns", &gateway(), "http"));

        let pref = ParentRef {
            namespace: Some("default".into()),
            name: "gateway-1".into(),
            section_name: None,
        };
        assert!(pref.targets("other-ns", &gateway(), "http"));
    }
}
