//! End-to-end exercise of one translation pass: snapshot in, listener status
//! and an ordered, hook-rewritten configuration fragment out.

use async_trait::async_trait;
use gatewayplane::extension::types::{
    PostListenerModifyRequest, PostListenerModifyResponse, PostRouteModifyRequest,
    PostRouteModifyResponse, PostTranslateModifyRequest, PostTranslateModifyResponse,
    PostVirtualHostModifyRequest, PostVirtualHostModifyResponse,
};
use gatewayplane::extension::{ExtensionService, XdsHookClient};
use gatewayplane::gateway::{
    Gateway, GatewayContext, HttpRouteSpec, ListenerProtocol, ListenerSpec, ParentRef,
    PolicyResource, ResourceSnapshot,
};
use gatewayplane::gateway::status::{
    ConditionStatus, LISTENER_CONDITION_ACCEPTED, LISTENER_CONDITION_PROGRAMMED,
    LISTENER_REASON_ACCEPTED,
};
use gatewayplane::gateway::RouteGroupKind;
use gatewayplane::xds::filters::{sort_http_filters, FilterCategory, FilterPosition, HttpFilter};
use gatewayplane::xds::{
    ClusterConfig, ListenerConfig, PathMatch, RouteActionConfig, RouteMatchConfig, RouteRule,
    SecretConfig, VirtualHostConfig,
};
use gatewayplane::Result;

fn snapshot() -> ResourceSnapshot {
    ResourceSnapshot {
        gateway_class: None,
        gateways: vec![Gateway {
            namespace: "default".into(),
            name: "gateway-1".into(),
            listeners: vec![
                ListenerSpec {
                    name: "http".into(),
                    protocol: ListenerProtocol::Http,
                    port: 80,
                    hostname: None,
                },
                ListenerSpec {
                    name: "https".into(),
                    protocol: ListenerProtocol::Https,
                    port: 443,
                    hostname: Some("api.example.com".into()),
                },
            ],
        }],
        routes: vec![HttpRouteSpec {
            namespace: "default".into(),
            name: "api-route".into(),
            hostnames: vec!["api.example.com".into()],
            parent_refs: vec![ParentRef {
                namespace: None,
                name: "gateway-1".into(),
                section_name: Some("https".into()),
            }],
        }],
        policies: vec![PolicyResource {
            kind: "SecurityPolicy".into(),
            namespace: "default".into(),
            name: "jwt-policy".into(),
            spec: serde_json::json!({"jwt": {"issuer": "https://idp.example.com"}}),
        }],
    }
}

/// Hook service that renames the rewritten cluster and leaves everything
/// else untouched.
struct ClusterRenamingService;

#[async_trait]
impl ExtensionService for ClusterRenamingService {
    async fn post_route_modify(
        &self,
        request: PostRouteModifyRequest,
    ) -> Result<PostRouteModifyResponse> {
        let mut route = request.route;
        if let RouteActionConfig::Cluster { name, timeout } = &route.action {
            route.action =
                RouteActionConfig::Cluster { name: format!("{}-v2", name), timeout: *timeout };
        }
        Ok(PostRouteModifyResponse { route })
    }

    async fn post_virtual_host_modify(
        &self,
        request: PostVirtualHostModifyRequest,
    ) -> Result<PostVirtualHostModifyResponse> {
        Ok(PostVirtualHostModifyResponse { virtual_host: request.virtual_host })
    }

    async fn post_listener_modify(
        &self,
        request: PostListenerModifyRequest,
    ) -> Result<PostListenerModifyResponse> {
        Ok(PostListenerModifyResponse { listener: request.listener })
    }

    async fn post_translate_modify(
        &self,
        request: PostTranslateModifyRequest,
    ) -> Result<PostTranslateModifyResponse> {
        Ok(PostTranslateModifyResponse { clusters: request.clusters, secrets: request.secrets })
    }
}

#[tokio::test]
async fn one_pass_produces_status_and_configuration() {
    let snapshot = snapshot();
    let mut ctx = GatewayContext::new(snapshot.gateways[0].clone());
    ctx.reset_listeners(&snapshot);

    // Status scaffolding: two listeners, route attachment counted for https.
    assert_eq!(ctx.status().listeners.len(), 2);
    assert_eq!(ctx.status().listeners[0].attached_routes, 0);
    assert_eq!(ctx.status().listeners[1].attached_routes, 1);

    for idx in 0..ctx.listeners().len() {
        let lctx = ctx.listeners()[idx].clone();
        ctx.set_supported_kinds(&lctx, vec![RouteGroupKind { group: None, kind: "HTTPRoute".into() }]);
        ctx.set_listener_condition(
            &lctx,
            LISTENER_CONDITION_ACCEPTED,
            ConditionStatus::True,
            LISTENER_REASON_ACCEPTED,
            "listener accepted",
        );
    }

    // Filter selection for the https listener's chain, scrambled on purpose.
    let filters = vec![
        HttpFilter::named(FilterCategory::Router.filter_name()),
        HttpFilter::named(HttpFilter::instance_name(
            FilterCategory::JwtAuthn,
            "securitypolicy",
            "default",
            "jwt-policy",
            None,
        )),
        HttpFilter::named(FilterCategory::Cors.filter_name()),
        HttpFilter::named(FilterCategory::RateLimit.filter_name()),
    ];
    let chain = sort_http_filters(
        filters,
        &[FilterPosition::before(FilterCategory::RateLimit, FilterCategory::Cors)],
    );

    let chain_names: Vec<&str> = chain.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        chain_names,
        vec![
            "envoy.filters.http.ratelimit",
            "envoy.filters.http.cors",
            "envoy.filters.http.jwt_authn/securitypolicy/default/jwt-policy",
            "envoy.filters.http.router",
        ]
    );

    // Hook round trips.
    let hooks = XdsHookClient::new(ClusterRenamingService);

    let route = RouteRule {
        name: Some("api".into()),
        r#match: RouteMatchConfig { path: PathMatch::Prefix("/api".into()), headers: vec![] },
        action: RouteActionConfig::Cluster { name: "backend".into(), timeout: Some(15) },
    };
    let hostnames = vec!["api.example.com".to_string()];
    let route = hooks
        .post_route_modify_hook(route, &hostnames, &snapshot.policies)
        .await
        .expect("route hook");
    assert_eq!(
        route.action,
        RouteActionConfig::Cluster { name: "backend-v2".into(), timeout: Some(15) }
    );

    let virtual_host = hooks
        .post_virtual_host_modify_hook(VirtualHostConfig {
            name: "api.example.com".into(),
            domains: vec!["api.example.com".into()],
            routes: vec![route],
        })
        .await
        .expect("virtual host hook");

    let listener = hooks
        .post_listener_modify_hook(
            ListenerConfig {
                name: "https".into(),
                address: "0.0.0.0".into(),
                port: 443,
                http_filters: chain,
                virtual_hosts: vec![virtual_host],
            },
            &snapshot.policies,
        )
        .await
        .expect("listener hook");

    let (clusters, secrets) = hooks
        .post_translate_modify_hook(
            vec![ClusterConfig { name: "backend-v2".into(), endpoints: vec![] }],
            vec![SecretConfig {
                name: "api-tls".into(),
                certificate_chain: None,
                private_key: None,
            }],
        )
        .await
        .expect("translate hook");

    // Final fragment is intact and status is ready for the status writer.
    assert_eq!(listener.virtual_hosts[0].routes.len(), 1);
    assert_eq!(clusters.len(), 1);
    assert_eq!(secrets.len(), 1);

    let status = ctx.into_status();
    assert!(status.listeners.iter().all(|l| {
        l.conditions.iter().any(|c| {
            c.condition_type == LISTENER_CONDITION_ACCEPTED && c.status == ConditionStatus::True
        })
    }));
    assert!(status
        .listeners
        .iter()
        .all(|l| l.conditions.iter().all(|c| c.condition_type != LISTENER_CONDITION_PROGRAMMED)));
}
