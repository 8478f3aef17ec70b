//! Route resource types
//!
//! A route belongs to a virtual router and sends matching traffic to one or
//! more weighted virtual nodes. The route flavour (gRPC, HTTP/2, HTTP or
//! TCP) is a tagged union. On the wire the flavours sit side by side as
//! `grpcRoute`, `http2Route`, `httpRoute` and `tcpRoute` next to
//! `priority`, and a document must populate exactly one of them.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::common::{total_weight, Duration, MatchRange, ResourceMetadata, WeightedTarget};
use super::enums::{
    GrpcRetryPolicyEvent, HttpMethod, HttpScheme, PortProtocol, RouteStatusCode,
    TcpRetryPolicyEvent,
};
use super::render::impl_render_display;
use super::timeout::{GrpcTimeout, HttpTimeout, TcpTimeout};

/// HTTP retry events the service accepts in `httpRetryEvents`.
pub const HTTP_RETRY_EVENTS: &[&str] = &["server-error", "gateway-error", "client-error", "stream-error"];

/// How a header or metadata value is compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderMatchMethod {
    Exact(String),
    Prefix(String),
    Range(MatchRange),
    Regex(String),
    Suffix(String),
}

impl HeaderMatchMethod {
    /// Whether `value` satisfies this method.
    ///
    /// A range only matches values that parse as integers. A pattern that
    /// does not compile matches nothing.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            HeaderMatchMethod::Exact(expected) => value == expected,
            HeaderMatchMethod::Prefix(prefix) => value.starts_with(prefix.as_str()),
            HeaderMatchMethod::Suffix(suffix) => value.ends_with(suffix.as_str()),
            HeaderMatchMethod::Range(range) => {
                value.trim().parse::<i64>().map(|v| range.contains(v)).unwrap_or(false)
            }
            HeaderMatchMethod::Regex(pattern) => {
                Regex::new(pattern).map(|re| re.is_match(value)).unwrap_or(false)
            }
        }
    }
}

/// gRPC metadata is compared the same way as HTTP headers.
pub type GrpcRouteMetadataMatchMethod = HeaderMatchMethod;

/// Header criterion of an HTTP route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteHeader {
    /// Absent means false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,

    /// Absent means the header only has to be present
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub r#match: Option<HeaderMatchMethod>,

    pub name: String,
}

impl HttpRouteHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self { invert: None, r#match: None, name: name.into() }
    }

    pub fn with_match(mut self, method: HeaderMatchMethod) -> Self {
        self.r#match = Some(method);
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = Some(invert);
        self
    }

    /// Evaluate against the header value of a request, `None` when absent.
    pub fn matches(&self, value: Option<&str>) -> bool {
        let hit = match (value, &self.r#match) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(value), Some(method)) => method.matches(value),
        };
        hit != self.invert.unwrap_or(false)
    }
}

/// Request criteria of an HTTP or HTTP/2 route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteMatch {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HttpRouteHeader>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,

    /// Path prefix, must start with `/`
    pub prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<HttpScheme>,
}

impl HttpRouteMatch {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self { headers: Vec::new(), method: None, prefix: prefix.into(), scheme: None }
    }

    pub fn with_header(mut self, header: HttpRouteHeader) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_scheme(mut self, scheme: HttpScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    pub fn matches_path(&self, path: &str) -> bool {
        path.starts_with(self.prefix.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteAction {
    /// 1-10 targets
    pub weighted_targets: Vec<WeightedTarget>,
}

impl HttpRouteAction {
    pub fn new(weighted_targets: Vec<WeightedTarget>) -> Self {
        Self { weighted_targets }
    }

    pub fn total_weight(&self) -> i64 {
        total_weight(&self.weighted_targets)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRetryPolicy {
    /// Values from [`HTTP_RETRY_EVENTS`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_retry_events: Vec<String>,

    pub max_retries: i64,

    pub per_retry_timeout: Duration,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tcp_retry_events: Vec<TcpRetryPolicyEvent>,
}

impl HttpRetryPolicy {
    pub fn new(max_retries: i64, per_retry_timeout: Duration) -> Self {
        Self {
            http_retry_events: Vec::new(),
            max_retries,
            per_retry_timeout,
            tcp_retry_events: Vec::new(),
        }
    }

    pub fn with_http_event(mut self, event: impl Into<String>) -> Self {
        self.http_retry_events.push(event.into());
        self
    }

    pub fn with_tcp_event(mut self, event: TcpRetryPolicyEvent) -> Self {
        self.tcp_retry_events.push(event);
        self
    }
}

/// Route for HTTP and HTTP/2 traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRoute {
    pub action: HttpRouteAction,

    #[serde(rename = "match")]
    pub r#match: HttpRouteMatch,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<HttpRetryPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<HttpTimeout>,
}

impl HttpRoute {
    pub fn new(route_match: HttpRouteMatch, weighted_targets: Vec<WeightedTarget>) -> Self {
        Self {
            action: HttpRouteAction::new(weighted_targets),
            r#match: route_match,
            retry_policy: None,
            timeout: None,
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: HttpRetryPolicy) -> Self {
        self.retry_policy = Some(retry_policy);
        self
    }

    pub fn with_timeout(mut self, timeout: HttpTimeout) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Metadata criterion of a gRPC route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRouteMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,

    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub r#match: Option<GrpcRouteMetadataMatchMethod>,

    pub name: String,
}

impl GrpcRouteMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { invert: None, r#match: None, name: name.into() }
    }

    pub fn with_match(mut self, method: GrpcRouteMetadataMatchMethod) -> Self {
        self.r#match = Some(method);
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = Some(invert);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRouteMatch {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<GrpcRouteMetadata>,

    /// Only meaningful together with `service_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

impl GrpcRouteMatch {
    pub fn service(service_name: impl Into<String>) -> Self {
        Self { service_name: Some(service_name.into()), ..Self::default() }
    }

    pub fn with_method_name(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = Some(method_name.into());
        self
    }

    pub fn with_metadata(mut self, metadata: GrpcRouteMetadata) -> Self {
        self.metadata.push(metadata);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRouteAction {
    pub weighted_targets: Vec<WeightedTarget>,
}

impl GrpcRouteAction {
    pub fn new(weighted_targets: Vec<WeightedTarget>) -> Self {
        Self { weighted_targets }
    }

    pub fn total_weight(&self) -> i64 {
        total_weight(&self.weighted_targets)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRetryPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grpc_retry_events: Vec<GrpcRetryPolicyEvent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_retry_events: Vec<String>,

    pub max_retries: i64,

    pub per_retry_timeout: Duration,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tcp_retry_events: Vec<TcpRetryPolicyEvent>,
}

impl GrpcRetryPolicy {
    pub fn new(max_retries: i64, per_retry_timeout: Duration) -> Self {
        Self {
            grpc_retry_events: Vec::new(),
            http_retry_events: Vec::new(),
            max_retries,
            per_retry_timeout,
            tcp_retry_events: Vec::new(),
        }
    }

    pub fn with_grpc_event(mut self, event: GrpcRetryPolicyEvent) -> Self {
        self.grpc_retry_events.push(event);
        self
    }

    pub fn with_http_event(mut self, event: impl Into<String>) -> Self {
        self.http_retry_events.push(event.into());
        self
    }
}

/// Route for gRPC traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcRoute {
    pub action: GrpcRouteAction,

    #[serde(rename = "match")]
    pub r#match: GrpcRouteMatch,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<GrpcRetryPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<GrpcTimeout>,
}

impl GrpcRoute {
    pub fn new(route_match: GrpcRouteMatch, weighted_targets: Vec<WeightedTarget>) -> Self {
        Self {
            action: GrpcRouteAction::new(weighted_targets),
            r#match: route_match,
            retry_policy: None,
            timeout: None,
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: GrpcRetryPolicy) -> Self {
        self.retry_policy = Some(retry_policy);
        self
    }

    pub fn with_timeout(mut self, timeout: GrpcTimeout) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpRouteAction {
    pub weighted_targets: Vec<WeightedTarget>,
}

impl TcpRouteAction {
    pub fn new(weighted_targets: Vec<WeightedTarget>) -> Self {
        Self { weighted_targets }
    }

    pub fn total_weight(&self) -> i64 {
        total_weight(&self.weighted_targets)
    }
}

/// Route for opaque TCP traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpRoute {
    pub action: TcpRouteAction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TcpTimeout>,
}

impl TcpRoute {
    pub fn new(weighted_targets: Vec<WeightedTarget>) -> Self {
        Self { action: TcpRouteAction::new(weighted_targets), timeout: None }
    }

    pub fn with_timeout(mut self, timeout: TcpTimeout) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The populated route flavour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteType {
    Grpc(GrpcRoute),
    Http2(HttpRoute),
    Http(HttpRoute),
    Tcp(TcpRoute),
}

impl RouteType {
    /// Listener protocol this route serves.
    pub fn protocol(&self) -> PortProtocol {
        match self {
            RouteType::Grpc(_) => PortProtocol::Grpc,
            RouteType::Http2(_) => PortProtocol::Http2,
            RouteType::Http(_) => PortProtocol::Http,
            RouteType::Tcp(_) => PortProtocol::Tcp,
        }
    }

    pub fn weighted_targets(&self) -> &[WeightedTarget] {
        match self {
            RouteType::Grpc(route) => &route.action.weighted_targets,
            RouteType::Http2(route) | RouteType::Http(route) => &route.action.weighted_targets,
            RouteType::Tcp(route) => &route.action.weighted_targets,
        }
    }

    pub fn total_weight(&self) -> i64 {
        total_weight(self.weighted_targets())
    }
}

/// Configuration of a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RouteSpecWire", into = "RouteSpecWire")]
pub struct RouteSpec {
    /// 0-1000, lower values are evaluated first
    pub priority: Option<i32>,

    pub route: RouteType,
}

impl RouteSpec {
    pub fn new(route: RouteType) -> Self {
        Self { priority: None, route }
    }

    pub fn grpc(route: GrpcRoute) -> Self {
        Self::new(RouteType::Grpc(route))
    }

    pub fn http2(route: HttpRoute) -> Self {
        Self::new(RouteType::Http2(route))
    }

    pub fn http(route: HttpRoute) -> Self {
        Self::new(RouteType::Http(route))
    }

    pub fn tcp(route: TcpRoute) -> Self {
        Self::new(RouteType::Tcp(route))
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn grpc_route(&self) -> Option<&GrpcRoute> {
        match &self.route {
            RouteType::Grpc(route) => Some(route),
            _ => None,
        }
    }

    pub fn http2_route(&self) -> Option<&HttpRoute> {
        match &self.route {
            RouteType::Http2(route) => Some(route),
            _ => None,
        }
    }

    pub fn http_route(&self) -> Option<&HttpRoute> {
        match &self.route {
            RouteType::Http(route) => Some(route),
            _ => None,
        }
    }

    pub fn tcp_route(&self) -> Option<&TcpRoute> {
        match &self.route {
            RouteType::Tcp(route) => Some(route),
            _ => None,
        }
    }

    /// Sum of the target weights of the populated flavour.
    pub fn total_weight(&self) -> i64 {
        self.route.total_weight()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteSpecWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grpc_route: Option<GrpcRoute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    http2_route: Option<HttpRoute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    http_route: Option<HttpRoute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    tcp_route: Option<TcpRoute>,
}

impl TryFrom<RouteSpecWire> for RouteSpec {
    type Error = String;

    fn try_from(wire: RouteSpecWire) -> Result<Self, Self::Error> {
        let mut routes: Vec<RouteType> = Vec::with_capacity(1);
        routes.extend(wire.grpc_route.map(RouteType::Grpc));
        routes.extend(wire.http2_route.map(RouteType::Http2));
        routes.extend(wire.http_route.map(RouteType::Http));
        routes.extend(wire.tcp_route.map(RouteType::Tcp));

        if routes.len() != 1 {
            return Err(format!(
                "route spec must set exactly one of grpcRoute, http2Route, httpRoute, tcpRoute (found {})",
                routes.len()
            ));
        }

        let route = routes.remove(0);
        Ok(RouteSpec { priority: wire.priority, route })
    }
}

impl From<RouteSpec> for RouteSpecWire {
    fn from(spec: RouteSpec) -> Self {
        let mut wire = RouteSpecWire {
            grpc_route: None,
            http2_route: None,
            http_route: None,
            priority: spec.priority,
            tcp_route: None,
        };
        match spec.route {
            RouteType::Grpc(route) => wire.grpc_route = Some(route),
            RouteType::Http2(route) => wire.http2_route = Some(route),
            RouteType::Http(route) => wire.http_route = Some(route),
            RouteType::Tcp(route) => wire.tcp_route = Some(route),
        }
        wire
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RouteStatusCode>,
}

impl RouteStatus {
    pub fn new(status: RouteStatusCode) -> Self {
        Self { status: Some(status) }
    }
}

/// A route as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    pub mesh_name: String,

    pub metadata: ResourceMetadata,

    pub route_name: String,

    pub spec: RouteSpec,

    pub status: RouteStatus,

    pub virtual_router_name: String,
}

impl RouteData {
    pub fn to_ref(&self) -> RouteRef {
        RouteRef {
            arn: self.metadata.arn.clone(),
            mesh_name: self.mesh_name.clone(),
            route_name: self.route_name.clone(),
            virtual_router_name: self.virtual_router_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRef {
    pub arn: String,

    pub mesh_name: String,

    pub route_name: String,

    pub virtual_router_name: String,
}

impl_render_display!(
    HeaderMatchMethod,
    HttpRouteHeader,
    HttpRouteMatch,
    HttpRouteAction,
    HttpRetryPolicy,
    HttpRoute,
    GrpcRouteMetadata,
    GrpcRouteMatch,
    GrpcRouteAction,
    GrpcRetryPolicy,
    GrpcRoute,
    TcpRouteAction,
    TcpRoute,
    RouteSpec,
    RouteStatus,
    RouteData,
    RouteRef,
);
