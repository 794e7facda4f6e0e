//! Extension hook client.
//!
//! [`XdsHookClient`] drives the four hook round trips against an
//! [`ExtensionService`] transport. It packages policy-derived resources into
//! opaque byte payloads, invokes the service, and substitutes the returned
//! fragment. A resource that fails to encode downgrades the call to a
//! pass-through: the original fragment is returned and no transport call is
//! made. Transport failures propagate to the caller, which decides whether
//! to fail the pass or keep the last good configuration.

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::Result;
use crate::extension::types::{
    encode_resources, PostListenerModifyRequest, PostListenerModifyResponse,
    PostRouteModifyRequest, PostRouteModifyResponse, PostTranslateModifyRequest,
    PostTranslateModifyResponse, PostVirtualHostModifyRequest, PostVirtualHostModifyResponse,
};
use crate::xds::resources::{ClusterConfig, ListenerConfig, RouteRule, SecretConfig, VirtualHostConfig};

/// Transport seam for the four extension hook calls.
///
/// Implementations are stateless across calls; each method is one
/// request/response round trip with the transport's own deadline applied.
#[async_trait]
pub trait ExtensionService: Send + Sync {
    async fn post_route_modify(
        &self,
        request: PostRouteModifyRequest,
    ) -> Result<PostRouteModifyResponse>;

    async fn post_virtual_host_modify(
        &self,
        request: PostVirtualHostModifyRequest,
    ) -> Result<PostVirtualHostModifyResponse>;

    async fn post_listener_modify(
        &self,
        request: PostListenerModifyRequest,
    ) -> Result<PostListenerModifyResponse>;

    async fn post_translate_modify(
        &self,
        request: PostTranslateModifyRequest,
    ) -> Result<PostTranslateModifyResponse>;
}

/// Client for the four translation injection points
#[derive(Debug)]
pub struct XdsHookClient<S> {
    service: S,
}

impl<S: ExtensionService> XdsHookClient<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Offer one route for replacement, with the hostnames it was matched
    /// under and the resources of its attached policies.
    pub async fn post_route_modify_hook<R: Serialize>(
        &self,
        route: RouteRule,
        hostnames: &[String],
        policy_resources: &[R],
    ) -> Result<RouteRule> {
        let extension_resources = match encode_resources(policy_resources) {
            Ok(encoded) => encoded,
            Err(error) => {
                tracing::warn!(
                    hook = "post_route_modify",
                    %error,
                    "Skipping extension hook: policy resource failed to encode"
                );
                return Ok(route);
            }
        };

        let response = self
            .service
            .post_route_modify(PostRouteModifyRequest {
                route,
                hostnames: hostnames.to_vec(),
                extension_resources,
            })
            .await?;
        Ok(response.route)
    }

    /// Offer one virtual host for replacement.
    pub async fn post_virtual_host_modify_hook(
        &self,
        virtual_host: VirtualHostConfig,
    ) -> Result<VirtualHostConfig> {
        let response = self
            .service
            .post_virtual_host_modify(PostVirtualHostModifyRequest { virtual_host })
            .await?;
        Ok(response.virtual_host)
    }

    /// Offer one listener's generated configuration for replacement, with
    /// the resources of its attached policies.
    pub async fn post_listener_modify_hook<R: Serialize>(
        &self,
        listener: ListenerConfig,
        policy_resources: &[R],
    ) -> Result<ListenerConfig> {
        let extension_resources = match encode_resources(policy_resources) {
            Ok(encoded) => encoded,
            Err(error) => {
                tracing::warn!(
                    hook = "post_listener_modify",
                    %error,
                    "Skipping extension hook: policy resource failed to encode"
                );
                return Ok(listener);
            }
        };

        let response = self
            .service
            .post_listener_modify(PostListenerModifyRequest { listener, extension_resources })
            .await?;
        Ok(response.listener)
    }

    /// Offer the pass's full set of clusters and secrets for replacement.
    pub async fn post_translate_modify_hook(
        &self,
        clusters: Vec<ClusterConfig>,
        secrets: Vec<SecretConfig>,
    ) -> Result<(Vec<ClusterConfig>, Vec<SecretConfig>)> {
        let response = self
            .service
            .post_translate_modify(PostTranslateModifyRequest { clusters, secrets })
            .await?;
        Ok((response.clusters, response.secrets))
    }
}
