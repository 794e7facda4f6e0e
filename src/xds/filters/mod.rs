//! HTTP filter chain building blocks.
//!
//! A filter chain is a list of named filter instances. Each instance belongs
//! to a [`FilterCategory`]; singleton categories appear at most once per
//! chain while multi categories contribute one instance per attached policy,
//! disambiguated through the instance name. Chain ordering lives in
//! [`sort`].

pub mod sort;

pub use sort::{sort_http_filters, FilterPosition, DEFAULT_FILTER_ORDER};

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Wrapper for binary payloads serialized as base64 in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Base64Bytes(pub Vec<u8>);

impl Serialize for Base64Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let encoded = BASE64_ENGINE.encode(&self.0);
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for Base64Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let decoded = BASE64_ENGINE
            .decode(encoded.as_bytes())
            .map_err(|err| serde::de::Error::custom(err.to_string()))?;
        Ok(Base64Bytes(decoded))
    }
}

/// A typed filter configuration payload.
///
/// The payload bytes are opaque to the chain assembler; only the extension
/// hook service and the wire encoder downstream interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedConfig {
    pub type_url: String,
    #[serde(default)]
    pub value: Base64Bytes,
}

/// Behavioral class of a processing step in the HTTP filter chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    HealthCheck,
    Fault,
    Cors,
    ExtAuthz,
    BasicAuth,
    OAuth2,
    JwtAuthn,
    Buffer,
    ExtProc,
    Wasm,
    Rbac,
    LocalRateLimit,
    RateLimit,
    Router,
}

impl FilterCategory {
    /// The well-known filter name for this category
    pub fn filter_name(&self) -> &'static str {
        match self {
            FilterCategory::HealthCheck => "envoy.filters.http.health_check",
            FilterCategory::Fault => "envoy.filters.http.fault",
            FilterCategory::Cors => "envoy.filters.http.cors",
            FilterCategory::ExtAuthz => "envoy.filters.http.ext_authz",
            FilterCategory::BasicAuth => "envoy.filters.http.basic_auth",
            FilterCategory::OAuth2 => "envoy.filters.http.oauth2",
            FilterCategory::JwtAuthn => "envoy.filters.http.jwt_authn",
            FilterCategory::Buffer => "envoy.filters.http.buffer",
            FilterCategory::ExtProc => "envoy.filters.http.ext_proc",
            FilterCategory::Wasm => "envoy.filters.http.wasm",
            FilterCategory::Rbac => "envoy.filters.http.rbac",
            FilterCategory::LocalRateLimit => "envoy.filters.http.local_ratelimit",
            FilterCategory::RateLimit => "envoy.filters.http.ratelimit",
            FilterCategory::Router => "envoy.filters.http.router",
        }
    }

    /// Whether a chain may contain more than one instance of this category.
    ///
    /// Multi categories get one instance per attached policy; everything
    /// else is merged into a single instance before chain assembly.
    pub fn is_multi(&self) -> bool {
        matches!(self, FilterCategory::ExtProc | FilterCategory::Wasm)
    }

    /// All known categories
    pub fn all() -> &'static [FilterCategory] {
        &sort::DEFAULT_FILTER_ORDER
    }

    /// Recover the category from an instance name.
    ///
    /// Instance names are either the bare category name or
    /// `<category>/<policy kind>/<namespace>/<name>[/<index>]`.
    pub fn from_instance_name(name: &str) -> Option<FilterCategory> {
        Self::all().iter().copied().find(|category| {
            let base = category.filter_name();
            name == base
                || (name.len() > base.len()
                    && name.starts_with(base)
                    && name.as_bytes()[base.len()] == b'/')
        })
    }
}

/// One concrete filter instance in a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpFilter {
    /// Instance name: category name plus an optional policy qualifier
    pub name: String,
    #[serde(default)]
    pub config: Option<TypedConfig>,
}

impl HttpFilter {
    /// Filter instance with no configuration payload
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), config: None }
    }

    /// Instance name for a filter inserted by a policy attachment.
    ///
    /// `index` disambiguates when a single policy yields several instances
    /// of a multi category.
    pub fn instance_name(
        category: FilterCategory,
        policy_kind: &str,
        namespace: &str,
        name: &str,
        index: Option<usize>,
    ) -> String {
        match index {
            Some(i) => {
                format!("{}/{}/{}/{}/{}", category.filter_name(), policy_kind, namespace, name, i)
            }
            None => format!("{}/{}/{}/{}", category.filter_name(), policy_kind, namespace, name),
        }
    }

    /// The category this instance belongs to, if known
    pub fn category(&self) -> Option<FilterCategory> {
        FilterCategory::from_instance_name(&self.name)
    }
}
