//! Wire format tests for mesh resources
//!
//! Documents are written the way a control plane returns them (camelCase,
//! absent fields omitted) and decoded with serde_json, or serde_yaml into
//! a JSON value first.

use std::collections::HashSet;

use appmesh_model::{
    Backend, ClientPolicy, ClientPolicyTls, Duration, DurationUnit, HealthCheckPolicy, HttpRoute,
    HttpRouteMatch, HttpTimeout, Listener, ListenerTimeout, ListenerTls, ListenerTlsCertificate,
    ListenerTlsMode, PortMapping, PortProtocol, RouteSpec, RouteType, TlsValidationContext,
    TlsValidationContextTrust, VirtualNodeSpec, VirtualServiceProvider, VirtualServiceSpec,
    WeightedTarget,
};
use serde_json::json;

fn orders_node() -> VirtualNodeSpec {
    let listener = Listener::new(PortMapping::http(8080))
        .with_health_check(HealthCheckPolicy::new(PortProtocol::Http).with_path("/ping"))
        .with_timeout(ListenerTimeout::Http(
            HttpTimeout::default().with_per_request(Duration::seconds(15)),
        ))
        .with_tls(ListenerTls::new(
            ListenerTlsCertificate::acm("arn:aws:acm:us-east-1:123456789012:certificate/abc"),
            ListenerTlsMode::Strict,
        ));

    VirtualNodeSpec::default()
        .with_listener(listener)
        .with_backend(Backend::virtual_service("payments.shop.local"))
}

#[test]
fn test_virtual_node_json_shape() {
    let value = serde_json::to_value(orders_node()).unwrap();

    assert_eq!(value["listeners"][0]["portMapping"], json!({"port": 8080, "protocol": "http"}));
    assert_eq!(value["listeners"][0]["healthCheck"]["path"], json!("/ping"));
    assert_eq!(
        value["listeners"][0]["timeout"],
        json!({"http": {"perRequest": {"unit": "s", "value": 15}}})
    );
    assert_eq!(
        value["listeners"][0]["tls"]["certificate"],
        json!({"acm": {"certificateArn": "arn:aws:acm:us-east-1:123456789012:certificate/abc"}})
    );
    assert_eq!(
        value["backends"],
        json!([{"virtualService": {"virtualServiceName": "payments.shop.local"}}])
    );
    assert!(value.get("logging").is_none());
    assert!(value.get("serviceDiscovery").is_none());
}

#[test]
fn test_virtual_node_decodes_from_yaml() {
    let yaml = r#"
listeners:
  - portMapping:
      port: 8080
      protocol: http
    healthCheck:
      healthyThreshold: 2
      intervalMillis: 5000
      protocol: http
      path: /ping
      timeoutMillis: 2000
      unhealthyThreshold: 2
    timeout:
      http:
        perRequest:
          unit: s
          value: 15
    tls:
      certificate:
        acm:
          certificateArn: arn:aws:acm:us-east-1:123456789012:certificate/abc
      mode: STRICT
backends:
  - virtualService:
      virtualServiceName: payments.shop.local
"#;
    // Unions are one-key maps on every wire format, so YAML goes through
    // the JSON data model rather than serde_yaml's `!tag` enum encoding.
    let document: serde_json::Value = serde_yaml::from_str(yaml).unwrap();
    assert!(document["listeners"][0]["timeout"]["http"].is_object());
    assert!(document["listeners"][0]["tls"]["certificate"]["acm"].is_object());

    let decoded: VirtualNodeSpec = serde_json::from_value(document).unwrap();
    assert_eq!(decoded, orders_node());
}

#[test]
fn test_union_rejects_two_branches() {
    let document = json!({
        "acm": {"certificateArn": "arn:aws:acm:us-east-1:123456789012:certificate/abc"},
        "file": {"certificateChain": "/certs/chain.pem", "privateKey": "/certs/key.pem"}
    });
    assert!(serde_json::from_value::<ListenerTlsCertificate>(document).is_err());
}

#[test]
fn test_route_spec_requires_exactly_one_flavour() {
    let none = json!({"priority": 10});
    let err = serde_json::from_value::<RouteSpec>(none).unwrap_err();
    assert!(err.to_string().contains("found 0"));

    let target = json!({"weightedTargets": [{"virtualNode": "orders-v1", "weight": 1}]});
    let two = json!({
        "httpRoute": {"action": target, "match": {"prefix": "/"}},
        "tcpRoute": {"action": target}
    });
    let err = serde_json::from_value::<RouteSpec>(two).unwrap_err();
    assert!(err.to_string().contains("found 2"));
}

#[test]
fn test_route_spec_wire_shape() {
    let spec = RouteSpec::http2(HttpRoute::new(
        HttpRouteMatch::prefix("/orders"),
        vec![WeightedTarget::new("orders-v1", 90), WeightedTarget::new("orders-v2", 10)],
    ))
    .with_priority(5);

    let value = serde_json::to_value(&spec).unwrap();
    assert_eq!(value["priority"], json!(5));
    assert_eq!(value["http2Route"]["match"], json!({"prefix": "/orders"}));
    assert_eq!(value["http2Route"]["action"]["weightedTargets"][1]["weight"], json!(10));
    assert!(value.get("httpRoute").is_none());

    let decoded: RouteSpec = serde_json::from_value(value).unwrap();
    assert!(matches!(decoded.route, RouteType::Http2(_)));
    assert_eq!(decoded.total_weight(), 100);
}

#[test]
fn test_unknown_enum_value_fails_decode() {
    let document = json!({"port": 8080, "protocol": "websocket"});
    assert!(serde_json::from_value::<PortMapping>(document).is_err());

    let document = json!({"unit": "minutes", "value": 1});
    assert!(serde_json::from_value::<Duration>(document).is_err());
}

#[test]
fn test_structural_equality_and_hashing() {
    let policy = ClientPolicy::default().with_tls(
        ClientPolicyTls::new(TlsValidationContext::new(TlsValidationContextTrust::file(
            "/certs/ca.pem",
        )))
        .with_port(443),
    );

    let mut seen = HashSet::new();
    assert!(seen.insert(policy.clone()));
    assert!(!seen.insert(policy.clone()));

    let other = ClientPolicy::default();
    assert_ne!(policy, other);
    assert!(seen.insert(other));
}

#[test]
fn test_virtual_service_provider_render() {
    let spec = VirtualServiceSpec::default()
        .with_provider(VirtualServiceProvider::virtual_router("orders-router"));
    assert_eq!(
        serde_json::to_value(&spec).unwrap(),
        json!({"provider": {"virtualRouter": {"virtualRouterName": "orders-router"}}})
    );
    assert_eq!(spec.provider.as_ref().and_then(|p| p.virtual_node_name()), None);
}

#[test]
fn test_duration_unit_wire_strings() {
    assert_eq!(DurationUnit::Seconds.as_str(), "s");
    assert_eq!(DurationUnit::Milliseconds.as_str(), "ms");
}
