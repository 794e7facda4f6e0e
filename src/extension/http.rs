//! HTTP/JSON transport for the extension hook service.
//!
//! Each hook call is a POST of the JSON-encoded request to
//! `{endpoint}/v1/hooks/<hook-name>`; the response body is the JSON-encoded
//! replacement fragment. The configured per-call timeout bounds every round
//! trip. There is no retry here: retries, if any, belong to the translation
//! driver's reconcile cadence.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ExtensionConfig;
use crate::errors::{Error, Result};
use crate::extension::client::ExtensionService;
use crate::extension::types::{
    PostListenerModifyRequest, PostListenerModifyResponse, PostRouteModifyRequest,
    PostRouteModifyResponse, PostTranslateModifyRequest, PostTranslateModifyResponse,
    PostVirtualHostModifyRequest, PostVirtualHostModifyResponse,
};

/// Extension hook service reached over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpExtensionService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExtensionService {
    /// Build a service client from configuration.
    ///
    /// Fails when no endpoint is configured or the endpoint is not a valid
    /// http(s) URL.
    pub fn new(config: &ExtensionConfig) -> Result<Self> {
        config.validate_endpoint()?;
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::config("Extension hook endpoint is not configured"))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::config(format!("Failed to build extension HTTP client: {}", e)))?;

        Ok(Self { client, base_url: endpoint.trim_end_matches('/').to_string() })
    }

    async fn call<Req, Resp>(&self, hook: &'static str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/v1/hooks/{}", self.base_url, hook);

        let response = self.client.post(&url).json(request).send().await.map_err(|e| {
            tracing::error!(hook, error = %e, "Extension hook call failed");
            Error::transport(hook, e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(hook, status = %status, "Extension hook returned failure status");
            return Err(Error::transport(hook, format!("unexpected status {}", status)));
        }

        response.json::<Resp>().await.map_err(|e| {
            tracing::error!(hook, error = %e, "Extension hook returned undecodable body");
            Error::transport(hook, format!("invalid response body: {}", e))
        })
    }
}

#[async_trait]
impl ExtensionService for HttpExtensionService {
    async fn post_route_modify(
        &self,
        request: PostRouteModifyRequest,
    ) -> Result<PostRouteModifyResponse> {
        self.call("post_route_modify", &request).await
    }

    async fn post_virtual_host_modify(
        &self,
        request: PostVirtualHostModifyRequest,
    ) -> Result<PostVirtualHostModifyResponse> {
        self.call("post_virtual_host_modify", &request).await
    }

    async fn post_listener_modify(
        &self,
        request: PostListenerModifyRequest,
    ) -> Result<PostListenerModifyResponse> {
        self.call("post_listener_modify", &request).await
    }

    async fn post_translate_modify(
        &self,
        request: PostTranslateModifyRequest,
    ) -> Result<PostTranslateModifyResponse> {
        self.call("post_translate_modify", &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xds::resources::{PathMatch, RouteActionConfig, RouteMatchConfig, RouteRule};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> HttpExtensionService {
        let config = ExtensionConfig { endpoint: Some(server.uri()), timeout_seconds: 2 };
        HttpExtensionService::new(&config).expect("build service")
    }

    fn route(cluster: &str) -> RouteRule {
        RouteRule {
            name: None,
            r#match: RouteMatchConfig { path: PathMatch::Prefix("/".into()), headers: vec![] },
            action: RouteActionConfig::Cluster { name: cluster.into(), timeout: None },
        }
    }

    #[test]
    fn new_requires_endpoint() {
        let config = ExtensionConfig { endpoint: None, timeout_seconds: 5 };
        assert!(matches!(HttpExtensionService::new(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn posts_to_hook_path_and_decodes_response() {
        let server = MockServer::start().await;
        let replacement = PostRouteModifyResponse { route: route("rewritten") };
        Mock::given(method("POST"))
            .and(path("/v1/hooks/post_route_modify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&replacement))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let response = service
            .post_route_modify(PostRouteModifyRequest {
                route: route("original"),
                hostnames: vec!["api.example.com".into()],
                extension_resources: vec![],
            })
            .await
            .expect("hook call");

        assert_eq!(response.route, route("rewritten"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/hooks/post_virtual_host_modify"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service
            .post_virtual_host_modify(PostVirtualHostModifyRequest {
                virtual_host: crate::xds::resources::VirtualHostConfig {
                    name: "vh".into(),
                    domains: vec!["*".into()],
                    routes: vec![],
                },
            })
            .await
            .expect_err("500 must fail");

        assert!(matches!(err, Error::Transport { hook: "post_virtual_host_modify", .. }));
    }

    #[tokio::test]
    async fn undecodable_body_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/hooks/post_translate_modify"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service
            .post_translate_modify(PostTranslateModifyRequest { clusters: vec![], secrets: vec![] })
            .await
            .expect_err("garbage body must fail");

        assert!(matches!(err, Error::Transport { hook: "post_translate_modify", .. }));
    }
}
