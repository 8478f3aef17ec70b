//! # Business Rules Validation
//!
//! Service-side constraints on resource specs that go beyond field lengths:
//! numeric bounds, traffic-split weights, protocol consistency and pattern
//! compilation. The model types accept any value; these rules run when a
//! spec is submitted to a backend.

use regex::Regex;

use crate::domain::{
    AccessLog, Backend, ClientPolicy, Duration, GrpcRoute, HeaderMatchMethod, HealthCheckPolicy,
    HttpRoute, HttpRouteHeader, Listener, ListenerTimeout, ListenerTls, ListenerTlsCertificate,
    PortMapping, PortProtocol, RouteSpec, RouteType, ServiceDiscovery, TcpRoute,
    TlsValidationContextTrust, VirtualNodeSpec, VirtualRouterSpec, VirtualServiceSpec,
    WeightedTarget, HTTP_RETRY_EVENTS,
};
use crate::errors::{AppMeshError, Result};

const MAX_WEIGHTED_TARGETS: usize = 10;
const MAX_ROUTE_HEADERS: usize = 10;
const MAX_PATH_LEN: usize = 255;

/// Port number validation, 1-65535
pub fn validate_port(port: i32, field: &str) -> Result<()> {
    if !(1..=65535).contains(&port) {
        return Err(AppMeshError::bad_request_field(
            format!("Port must be between 1 and 65535, got {}", port),
            field,
        ));
    }
    Ok(())
}

pub fn validate_port_mapping(port_mapping: &PortMapping, field: &str) -> Result<()> {
    validate_port(port_mapping.port, &format!("{}.port", field))
}

/// Durations must carry a unit and a non-negative value
pub fn validate_duration(duration: &Duration, field: &str) -> Result<()> {
    if duration.unit.is_none() {
        return Err(AppMeshError::bad_request_field("Duration unit is required", field));
    }
    match duration.value {
        Some(value) if value >= 0 => Ok(()),
        Some(_) => {
            Err(AppMeshError::bad_request_field("Duration value cannot be negative", field))
        }
        None => Err(AppMeshError::bad_request_field("Duration value is required", field)),
    }
}

fn validate_file_path(path: &str, field: &str) -> Result<()> {
    if path.is_empty() || path.chars().count() > MAX_PATH_LEN {
        return Err(AppMeshError::bad_request_field(
            format!("Path must be 1-{} characters", MAX_PATH_LEN),
            field,
        ));
    }
    Ok(())
}

/// Health check thresholds and timings
pub fn validate_health_check(health_check: &HealthCheckPolicy, field: &str) -> Result<()> {
    if !(2..=10).contains(&health_check.healthy_threshold) {
        return Err(AppMeshError::bad_request_field(
            "Healthy threshold must be between 2 and 10",
            format!("{}.healthyThreshold", field),
        ));
    }

    if !(2..=10).contains(&health_check.unhealthy_threshold) {
        return Err(AppMeshError::bad_request_field(
            "Unhealthy threshold must be between 2 and 10",
            format!("{}.unhealthyThreshold", field),
        ));
    }

    if !(5_000..=300_000).contains(&health_check.interval_millis) {
        return Err(AppMeshError::bad_request_field(
            "Health check interval must be between 5000 and 300000 ms",
            format!("{}.intervalMillis", field),
        ));
    }

    if !(2_000..=60_000).contains(&health_check.timeout_millis) {
        return Err(AppMeshError::bad_request_field(
            "Health check timeout must be between 2000 and 60000 ms",
            format!("{}.timeoutMillis", field),
        ));
    }

    if let Some(port) = health_check.port {
        validate_port(port, &format!("{}.port", field))?;
    }

    Ok(())
}

/// Listener timeout flavour must match the listener protocol
pub fn validate_listener_timeout(
    timeout: &ListenerTimeout,
    protocol: PortProtocol,
    field: &str,
) -> Result<()> {
    let timeout_protocol = match timeout {
        ListenerTimeout::Grpc(_) => PortProtocol::Grpc,
        ListenerTimeout::Http(_) => PortProtocol::Http,
        ListenerTimeout::Http2(_) => PortProtocol::Http2,
        ListenerTimeout::Tcp(_) => PortProtocol::Tcp,
    };

    if timeout_protocol != protocol {
        return Err(AppMeshError::bad_request_field(
            format!("A {} timeout cannot be set on a {} listener", timeout_protocol, protocol),
            field,
        ));
    }

    for duration in timeout.durations() {
        validate_duration(duration, field)?;
    }

    Ok(())
}

pub fn validate_listener_tls(tls: &ListenerTls, field: &str) -> Result<()> {
    match &tls.certificate {
        ListenerTlsCertificate::Acm(acm) => {
            if acm.certificate_arn.is_empty() {
                return Err(AppMeshError::bad_request_field(
                    "Certificate ARN cannot be empty",
                    format!("{}.certificate.acm.certificateArn", field),
                ));
            }
        }
        ListenerTlsCertificate::File(file) => {
            validate_file_path(
                &file.certificate_chain,
                &format!("{}.certificate.file.certificateChain", field),
            )?;
            validate_file_path(&file.private_key, &format!("{}.certificate.file.privateKey", field))?;
        }
    }
    Ok(())
}

/// Client TLS policy: 1-3 ACM authorities, valid ports
pub fn validate_client_policy(policy: &ClientPolicy, field: &str) -> Result<()> {
    let Some(tls) = &policy.tls else {
        return Ok(());
    };

    for port in &tls.ports {
        validate_port(*port, &format!("{}.tls.ports", field))?;
    }

    match &tls.validation.trust {
        TlsValidationContextTrust::Acm(acm) => {
            let count = acm.certificate_authority_arns.len();
            if !(1..=3).contains(&count) {
                return Err(AppMeshError::bad_request_field(
                    format!("Between 1 and 3 certificate authority ARNs are required, got {}", count),
                    format!("{}.tls.validation.trust.acm.certificateAuthorityArns", field),
                ));
            }
        }
        TlsValidationContextTrust::File(file) => {
            validate_file_path(
                &file.certificate_chain,
                &format!("{}.tls.validation.trust.file.certificateChain", field),
            )?;
        }
    }

    Ok(())
}

pub fn validate_listener(listener: &Listener, field: &str) -> Result<()> {
    validate_port_mapping(&listener.port_mapping, &format!("{}.portMapping", field))?;

    if let Some(health_check) = &listener.health_check {
        validate_health_check(health_check, &format!("{}.healthCheck", field))?;
    }

    if let Some(timeout) = &listener.timeout {
        validate_listener_timeout(
            timeout,
            listener.port_mapping.protocol,
            &format!("{}.timeout", field),
        )?;
    }

    if let Some(tls) = &listener.tls {
        validate_listener_tls(tls, &format!("{}.tls", field))?;
    }

    Ok(())
}

/// Virtual node spec validation
pub fn validate_virtual_node_spec(spec: &VirtualNodeSpec) -> Result<()> {
    if spec.listeners.len() > 1 {
        return Err(AppMeshError::bad_request_field(
            "A virtual node supports at most one listener",
            "spec.listeners",
        ));
    }

    for (index, listener) in spec.listeners.iter().enumerate() {
        validate_listener(listener, &format!("spec.listeners[{}]", index))?;
    }

    for (index, name) in spec.backend_service_names().enumerate() {
        if name.is_empty() {
            return Err(AppMeshError::bad_request_field(
                "Backend virtual service name cannot be empty",
                format!("spec.backends[{}]", index),
            ));
        }
    }

    for (index, backend) in spec.backends.iter().enumerate() {
        let Backend::VirtualService(backend) = backend;
        if let Some(policy) = &backend.client_policy {
            validate_client_policy(policy, &format!("spec.backends[{}].clientPolicy", index))?;
        }
    }

    if let Some(policy) = spec.backend_defaults.as_ref().and_then(|d| d.client_policy.as_ref()) {
        validate_client_policy(policy, "spec.backendDefaults.clientPolicy")?;
    }

    match &spec.service_discovery {
        Some(ServiceDiscovery::Dns(dns)) if dns.hostname.is_empty() => {
            return Err(AppMeshError::bad_request_field(
                "DNS hostname cannot be empty",
                "spec.serviceDiscovery.dns.hostname",
            ));
        }
        Some(ServiceDiscovery::AwsCloudMap(cloud_map))
            if cloud_map.namespace_name.is_empty() || cloud_map.service_name.is_empty() =>
        {
            return Err(AppMeshError::bad_request_field(
                "Cloud Map namespace and service names are required",
                "spec.serviceDiscovery.awsCloudMap",
            ));
        }
        _ => {}
    }

    if let Some(AccessLog::File(file)) =
        spec.logging.as_ref().and_then(|l| l.access_log.as_ref())
    {
        validate_file_path(&file.path, "spec.logging.accessLog.file.path")?;
    }

    Ok(())
}

/// Virtual router spec validation
pub fn validate_virtual_router_spec(spec: &VirtualRouterSpec) -> Result<()> {
    if spec.listeners.len() > 1 {
        return Err(AppMeshError::bad_request_field(
            "A virtual router supports at most one listener",
            "spec.listeners",
        ));
    }

    for (index, listener) in spec.listeners.iter().enumerate() {
        validate_port_mapping(
            &listener.port_mapping,
            &format!("spec.listeners[{}].portMapping", index),
        )?;
    }

    Ok(())
}

/// Virtual service spec validation
pub fn validate_virtual_service_spec(spec: &VirtualServiceSpec) -> Result<()> {
    let name = spec
        .provider
        .as_ref()
        .and_then(|p| p.virtual_node_name().or_else(|| p.virtual_router_name()));

    if name.is_some_and(str::is_empty) {
        return Err(AppMeshError::bad_request_field(
            "Provider name cannot be empty",
            "spec.provider",
        ));
    }

    Ok(())
}

/// Weighted targets: 1-10 entries, weights 0-100, total at most 100
pub fn validate_weighted_targets(targets: &[WeightedTarget], field: &str) -> Result<()> {
    if targets.is_empty() {
        return Err(AppMeshError::bad_request_field(
            "At least one weighted target is required",
            field,
        ));
    }

    if targets.len() > MAX_WEIGHTED_TARGETS {
        return Err(AppMeshError::bad_request_field(
            format!("At most {} weighted targets are allowed", MAX_WEIGHTED_TARGETS),
            field,
        ));
    }

    for target in targets {
        if target.virtual_node.is_empty() {
            return Err(AppMeshError::bad_request_field(
                "Weighted target virtual node cannot be empty",
                field,
            ));
        }
        if !(0..=100).contains(&target.weight) {
            return Err(AppMeshError::bad_request_field(
                format!("Weight for '{}' must be between 0 and 100", target.virtual_node),
                field,
            ));
        }
    }

    let total = crate::domain::total_weight(targets);
    if total > 100 {
        return Err(AppMeshError::bad_request_field(
            format!("Weighted target total must not exceed 100, got {}", total),
            field,
        ));
    }

    Ok(())
}

fn validate_match_method(method: &HeaderMatchMethod, field: &str) -> Result<()> {
    match method {
        HeaderMatchMethod::Range(range) if range.is_empty() => Err(AppMeshError::bad_request_field(
            format!("Range end ({}) must be greater than start ({})", range.end, range.start),
            field,
        )),
        HeaderMatchMethod::Regex(pattern) => Regex::new(pattern).map(|_| ()).map_err(|e| {
            AppMeshError::bad_request_field(format!("Invalid regex pattern: {}", e), field)
        }),
        HeaderMatchMethod::Exact(value)
        | HeaderMatchMethod::Prefix(value)
        | HeaderMatchMethod::Suffix(value)
            if value.is_empty() =>
        {
            Err(AppMeshError::bad_request_field("Match value cannot be empty", field))
        }
        _ => Ok(()),
    }
}

fn validate_route_header(header: &HttpRouteHeader, field: &str) -> Result<()> {
    if header.name.is_empty() || header.name.chars().count() > 50 {
        return Err(AppMeshError::bad_request_field(
            "Header name must be 1-50 characters",
            format!("{}.name", field),
        ));
    }
    if let Some(method) = &header.r#match {
        validate_match_method(method, &format!("{}.match", field))?;
    }
    Ok(())
}

fn validate_retry_events(http_events: &[String], field: &str) -> Result<()> {
    for event in http_events {
        if !HTTP_RETRY_EVENTS.contains(&event.as_str()) {
            return Err(AppMeshError::bad_request_field(
                format!(
                    "Unknown HTTP retry event '{}', expected one of {}",
                    event,
                    HTTP_RETRY_EVENTS.join(", ")
                ),
                field,
            ));
        }
    }
    Ok(())
}

fn validate_http_route(route: &HttpRoute, field: &str) -> Result<()> {
    validate_weighted_targets(
        &route.action.weighted_targets,
        &format!("{}.action.weightedTargets", field),
    )?;

    if !route.r#match.prefix.starts_with('/') {
        return Err(AppMeshError::bad_request_field(
            "Route prefix must start with '/'",
            format!("{}.match.prefix", field),
        ));
    }

    if route.r#match.headers.len() > MAX_ROUTE_HEADERS {
        return Err(AppMeshError::bad_request_field(
            format!("At most {} header matches are allowed", MAX_ROUTE_HEADERS),
            format!("{}.match.headers", field),
        ));
    }

    for (index, header) in route.r#match.headers.iter().enumerate() {
        validate_route_header(header, &format!("{}.match.headers[{}]", field, index))?;
    }

    if let Some(retry) = &route.retry_policy {
        let retry_field = format!("{}.retryPolicy", field);
        if retry.max_retries < 0 {
            return Err(AppMeshError::bad_request_field(
                "Max retries cannot be negative",
                format!("{}.maxRetries", retry_field),
            ));
        }
        validate_duration(&retry.per_retry_timeout, &format!("{}.perRetryTimeout", retry_field))?;
        validate_retry_events(&retry.http_retry_events, &format!("{}.httpRetryEvents", retry_field))?;
        if retry.http_retry_events.is_empty() && retry.tcp_retry_events.is_empty() {
            return Err(AppMeshError::bad_request_field(
                "A retry policy needs at least one HTTP or TCP retry event",
                retry_field,
            ));
        }
    }

    if let Some(timeout) = &route.timeout {
        for duration in timeout.idle.iter().chain(timeout.per_request.iter()) {
            validate_duration(duration, &format!("{}.timeout", field))?;
        }
    }

    Ok(())
}

fn validate_grpc_route(route: &GrpcRoute, field: &str) -> Result<()> {
    validate_weighted_targets(
        &route.action.weighted_targets,
        &format!("{}.action.weightedTargets", field),
    )?;

    if route.r#match.method_name.is_some() && route.r#match.service_name.is_none() {
        return Err(AppMeshError::bad_request_field(
            "A method name can only be matched together with a service name",
            format!("{}.match.methodName", field),
        ));
    }

    for (index, metadata) in route.r#match.metadata.iter().enumerate() {
        let metadata_field = format!("{}.match.metadata[{}]", field, index);
        if metadata.name.is_empty() || metadata.name.chars().count() > 50 {
            return Err(AppMeshError::bad_request_field(
                "Metadata name must be 1-50 characters",
                format!("{}.name", metadata_field),
            ));
        }
        if let Some(method) = &metadata.r#match {
            validate_match_method(method, &format!("{}.match", metadata_field))?;
        }
    }

    if let Some(retry) = &route.retry_policy {
        let retry_field = format!("{}.retryPolicy", field);
        if retry.max_retries < 0 {
            return Err(AppMeshError::bad_request_field(
                "Max retries cannot be negative",
                format!("{}.maxRetries", retry_field),
            ));
        }
        validate_duration(&retry.per_retry_timeout, &format!("{}.perRetryTimeout", retry_field))?;
        validate_retry_events(&retry.http_retry_events, &format!("{}.httpRetryEvents", retry_field))?;
        if retry.grpc_retry_events.is_empty()
            && retry.http_retry_events.is_empty()
            && retry.tcp_retry_events.is_empty()
        {
            return Err(AppMeshError::bad_request_field(
                "A retry policy needs at least one gRPC, HTTP or TCP retry event",
                retry_field,
            ));
        }
    }

    if let Some(timeout) = &route.timeout {
        for duration in timeout.idle.iter().chain(timeout.per_request.iter()) {
            validate_duration(duration, &format!("{}.timeout", field))?;
        }
    }

    Ok(())
}

fn validate_tcp_route(route: &TcpRoute, field: &str) -> Result<()> {
    validate_weighted_targets(
        &route.action.weighted_targets,
        &format!("{}.action.weightedTargets", field),
    )?;

    if let Some(idle) = route.timeout.as_ref().and_then(|t| t.idle.as_ref()) {
        validate_duration(idle, &format!("{}.timeout.idle", field))?;
    }

    Ok(())
}

/// Route spec validation
pub fn validate_route_spec(spec: &RouteSpec) -> Result<()> {
    if let Some(priority) = spec.priority {
        if !(0..=1000).contains(&priority) {
            return Err(AppMeshError::bad_request_field(
                "Route priority must be between 0 and 1000",
                "spec.priority",
            ));
        }
    }

    match &spec.route {
        RouteType::Grpc(route) => validate_grpc_route(route, "spec.grpcRoute"),
        RouteType::Http2(route) => validate_http_route(route, "spec.http2Route"),
        RouteType::Http(route) => validate_http_route(route, "spec.httpRoute"),
        RouteType::Tcp(route) => validate_tcp_route(route, "spec.tcpRoute"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        GrpcRetryPolicy, GrpcRetryPolicyEvent, GrpcRouteMatch, HttpRetryPolicy, HttpRouteMatch,
        HttpTimeout, MatchRange, TcpRetryPolicyEvent,
    };

    fn field_of(error: AppMeshError) -> Option<String> {
        match error {
            AppMeshError::BadRequest { field, .. } => field,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    fn http_spec(targets: Vec<WeightedTarget>) -> RouteSpec {
        RouteSpec::http(HttpRoute::new(HttpRouteMatch::prefix("/"), targets))
    }

    #[test]
    fn test_port_bounds() {
        assert!(validate_port(1, "port").is_ok());
        assert!(validate_port(65535, "port").is_ok());
        assert!(validate_port(0, "port").is_err());
        assert!(validate_port(65536, "port").is_err());
    }

    #[test]
    fn test_weight_sum_over_one_hundred_rejected() {
        let spec = http_spec(vec![WeightedTarget::new("a", 60), WeightedTarget::new("b", 50)]);
        let err = validate_route_spec(&spec).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("spec.httpRoute.action.weightedTargets"));

        let ok = http_spec(vec![WeightedTarget::new("a", 60), WeightedTarget::new("b", 40)]);
        assert!(validate_route_spec(&ok).is_ok());
    }

    #[test]
    fn test_empty_weighted_targets_rejected() {
        let spec = RouteSpec::tcp(TcpRoute::new(vec![]));
        assert!(validate_route_spec(&spec).is_err());
    }

    #[test]
    fn test_too_many_targets_rejected() {
        let targets = (0..11).map(|i| WeightedTarget::new(format!("n{i}"), 1)).collect();
        assert!(validate_route_spec(&http_spec(targets)).is_err());
    }

    #[test]
    fn test_priority_bounds() {
        let spec = http_spec(vec![WeightedTarget::new("a", 1)]);
        assert!(validate_route_spec(&spec.clone().with_priority(1000)).is_ok());
        assert!(validate_route_spec(&spec.with_priority(1001)).is_err());
    }

    #[test]
    fn test_prefix_must_be_absolute() {
        let spec = RouteSpec::http(HttpRoute::new(
            HttpRouteMatch::prefix("orders"),
            vec![WeightedTarget::new("a", 1)],
        ));
        assert!(validate_route_spec(&spec).is_err());
    }

    #[test]
    fn test_header_rules() {
        let bad_regex = HttpRouteMatch::prefix("/")
            .with_header(HttpRouteHeader::new("x-v").with_match(HeaderMatchMethod::Regex("(".into())));
        let spec = RouteSpec::http(HttpRoute::new(bad_regex, vec![WeightedTarget::new("a", 1)]));
        assert!(validate_route_spec(&spec).is_err());

        let empty_range = HttpRouteMatch::prefix("/").with_header(
            HttpRouteHeader::new("x-v").with_match(HeaderMatchMethod::Range(MatchRange::new(5, 5))),
        );
        let spec = RouteSpec::http(HttpRoute::new(empty_range, vec![WeightedTarget::new("a", 1)]));
        assert!(validate_route_spec(&spec).is_err());
    }

    #[test]
    fn test_retry_policy_events() {
        let route = |policy: HttpRetryPolicy| {
            RouteSpec::http(
                HttpRoute::new(HttpRouteMatch::prefix("/"), vec![WeightedTarget::new("a", 1)])
                    .with_retry_policy(policy),
            )
        };
        let good = HttpRetryPolicy::new(3, Duration::seconds(1)).with_http_event("server-error");
        assert!(validate_route_spec(&route(good)).is_ok());

        let tcp_only = HttpRetryPolicy::new(3, Duration::seconds(1))
            .with_tcp_event(TcpRetryPolicyEvent::ConnectionError);
        assert!(validate_route_spec(&route(tcp_only)).is_ok());

        let unknown = HttpRetryPolicy::new(3, Duration::seconds(1)).with_http_event("teapot");
        assert!(validate_route_spec(&route(unknown)).is_err());

        let none = HttpRetryPolicy::new(3, Duration::seconds(1));
        assert!(validate_route_spec(&route(none)).is_err());
    }

    #[test]
    fn test_grpc_retry_policy_events() {
        let route = |policy: GrpcRetryPolicy| {
            RouteSpec::grpc(
                GrpcRoute::new(
                    GrpcRouteMatch::service("orders.Orders"),
                    vec![WeightedTarget::new("a", 1)],
                )
                .with_retry_policy(policy),
            )
        };
        let grpc_only = GrpcRetryPolicy::new(2, Duration::seconds(1))
            .with_grpc_event(GrpcRetryPolicyEvent::Unavailable);
        assert!(validate_route_spec(&route(grpc_only)).is_ok());

        let http_only = GrpcRetryPolicy::new(2, Duration::seconds(1)).with_http_event("gateway-error");
        assert!(validate_route_spec(&route(http_only)).is_ok());

        let none = GrpcRetryPolicy::new(2, Duration::seconds(1));
        let err = validate_route_spec(&route(none)).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("spec.grpcRoute.retryPolicy"));
    }

    #[test]
    fn test_grpc_method_needs_service() {
        let mut route_match = GrpcRouteMatch::default();
        route_match.method_name = Some("Get".into());
        let spec = RouteSpec::grpc(GrpcRoute::new(route_match, vec![WeightedTarget::new("a", 1)]));
        assert!(validate_route_spec(&spec).is_err());

        let spec = RouteSpec::grpc(GrpcRoute::new(
            GrpcRouteMatch::service("orders.Orders").with_method_name("Get"),
            vec![WeightedTarget::new("a", 1)],
        ));
        assert!(validate_route_spec(&spec).is_ok());
    }

    #[test]
    fn test_virtual_node_listener_rules() {
        let spec = VirtualNodeSpec::default().with_listener(Listener::new(PortMapping::http(0)));
        let err = validate_virtual_node_spec(&spec).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("spec.listeners[0].portMapping.port"));

        let two = VirtualNodeSpec::default()
            .with_listener(Listener::new(PortMapping::http(80)))
            .with_listener(Listener::new(PortMapping::http(81)));
        assert!(validate_virtual_node_spec(&two).is_err());
    }

    #[test]
    fn test_listener_timeout_must_match_protocol() {
        let listener = Listener::new(PortMapping::new(9090, PortProtocol::Grpc))
            .with_timeout(ListenerTimeout::Http(HttpTimeout::default()));
        let spec = VirtualNodeSpec::default().with_listener(listener);
        assert!(validate_virtual_node_spec(&spec).is_err());
    }

    #[test]
    fn test_health_check_bounds() {
        let ok = HealthCheckPolicy::new(PortProtocol::Http);
        assert!(validate_health_check(&ok, "hc").is_ok());
        assert!(validate_health_check(&ok.clone().with_thresholds(1, 2), "hc").is_err());
        assert!(validate_health_check(&ok.clone().with_interval_millis(4_999), "hc").is_err());
        assert!(validate_health_check(&ok.with_timeout_millis(60_001), "hc").is_err());
    }

    #[test]
    fn test_client_policy_authority_count() {
        use crate::domain::{ClientPolicyTls, TlsValidationContext};
        let arns = ["a", "b", "c", "d"];
        let policy = ClientPolicy::default().with_tls(ClientPolicyTls::new(TlsValidationContext::new(
            TlsValidationContextTrust::acm(arns),
        )));
        let spec = VirtualNodeSpec::default()
            .with_backend(Backend::virtual_service("payments.local"))
            .with_backend_defaults(policy);
        assert!(validate_virtual_node_spec(&spec).is_err());
    }

    #[test]
    fn test_router_single_listener() {
        let spec = VirtualRouterSpec::default()
            .with_listener(PortMapping::http(80))
            .with_listener(PortMapping::http(81));
        assert!(validate_virtual_router_spec(&spec).is_err());
        assert!(validate_virtual_router_spec(&VirtualRouterSpec::default()).is_ok());
    }

    #[test]
    fn test_duration_rules() {
        assert!(validate_duration(&Duration::millis(0), "d").is_ok());
        assert!(validate_duration(&Duration::millis(-1), "d").is_err());
        assert!(validate_duration(&Duration::default().with_value(1), "d").is_err());
    }
}
