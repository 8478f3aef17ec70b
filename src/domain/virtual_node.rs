//! Virtual node resource types
//!
//! A virtual node is a logical pointer to one deployment of a service. Its
//! spec declares inbound listeners, permitted outbound backends, service
//! discovery and access logging.

use serde::{Deserialize, Serialize};

use super::common::{PortMapping, ResourceMetadata};
use super::enums::{PortProtocol, VirtualNodeStatusCode};
use super::render::impl_render_display;
use super::timeout::ListenerTimeout;
use super::tls::{ClientPolicy, ListenerTls};

/// Active health checking of a listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckPolicy {
    /// Consecutive successes before healthy, 2-10
    pub healthy_threshold: i32,

    /// Time between checks, 5000-300000 ms
    pub interval_millis: i64,

    /// Destination path, HTTP and HTTP/2 only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Defaults to the listener port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,

    pub protocol: PortProtocol,

    /// Time to wait for a response, 2000-60000 ms
    pub timeout_millis: i64,

    /// Consecutive failures before unhealthy, 2-10
    pub unhealthy_threshold: i32,
}

impl HealthCheckPolicy {
    /// A policy using the service's documented lower bounds.
    pub fn new(protocol: PortProtocol) -> Self {
        Self {
            healthy_threshold: 2,
            interval_millis: 5_000,
            path: None,
            port: None,
            protocol,
            timeout_millis: 2_000,
            unhealthy_threshold: 2,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_port(mut self, port: i32) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_thresholds(mut self, healthy: i32, unhealthy: i32) -> Self {
        self.healthy_threshold = healthy;
        self.unhealthy_threshold = unhealthy;
        self
    }

    pub fn with_interval_millis(mut self, interval_millis: i64) -> Self {
        self.interval_millis = interval_millis;
        self
    }

    pub fn with_timeout_millis(mut self, timeout_millis: i64) -> Self {
        self.timeout_millis = timeout_millis;
        self
    }
}

/// An inbound traffic acceptance point of a virtual node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listener {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckPolicy>,

    pub port_mapping: PortMapping,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<ListenerTimeout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ListenerTls>,
}

impl Listener {
    pub fn new(port_mapping: PortMapping) -> Self {
        Self { health_check: None, port_mapping, timeout: None, tls: None }
    }

    pub fn with_health_check(mut self, health_check: HealthCheckPolicy) -> Self {
        self.health_check = Some(health_check);
        self
    }

    pub fn with_timeout(mut self, timeout: ListenerTimeout) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_tls(mut self, tls: ListenerTls) -> Self {
        self.tls = Some(tls);
        self
    }
}

/// A virtual service the node is permitted to call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceBackend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_policy: Option<ClientPolicy>,

    pub virtual_service_name: String,
}

impl VirtualServiceBackend {
    pub fn new(virtual_service_name: impl Into<String>) -> Self {
        Self { client_policy: None, virtual_service_name: virtual_service_name.into() }
    }

    pub fn with_client_policy(mut self, client_policy: ClientPolicy) -> Self {
        self.client_policy = Some(client_policy);
        self
    }
}

/// An outbound dependency of a virtual node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Backend {
    VirtualService(VirtualServiceBackend),
}

impl Backend {
    pub fn virtual_service(name: impl Into<String>) -> Self {
        Self::VirtualService(VirtualServiceBackend::new(name))
    }

    pub fn virtual_service_name(&self) -> &str {
        match self {
            Backend::VirtualService(backend) => &backend.virtual_service_name,
        }
    }
}

/// Policy applied to every backend unless the backend overrides it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_policy: Option<ClientPolicy>,
}

/// Access log written to a file path on the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAccessLog {
    pub path: String,
}

/// Access log destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessLog {
    File(FileAccessLog),
}

impl AccessLog {
    pub fn file(path: impl Into<String>) -> Self {
        Self::File(FileAccessLog { path: path.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_log: Option<AccessLog>,
}

/// Cloud Map instance attribute used to filter discovered instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsCloudMapInstanceAttribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsCloudMapServiceDiscovery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AwsCloudMapInstanceAttribute>,

    pub namespace_name: String,

    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsServiceDiscovery {
    pub hostname: String,
}

/// How the proxy discovers instances of this node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceDiscovery {
    AwsCloudMap(AwsCloudMapServiceDiscovery),
    Dns(DnsServiceDiscovery),
}

impl ServiceDiscovery {
    pub fn dns(hostname: impl Into<String>) -> Self {
        Self::Dns(DnsServiceDiscovery { hostname: hostname.into() })
    }

    pub fn cloud_map(namespace_name: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self::AwsCloudMap(AwsCloudMapServiceDiscovery {
            attributes: Vec::new(),
            namespace_name: namespace_name.into(),
            service_name: service_name.into(),
        })
    }
}

/// Configuration of a virtual node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_defaults: Option<BackendDefaults>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backends: Vec<Backend>,

    /// At most one listener
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<Listener>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_discovery: Option<ServiceDiscovery>,
}

impl VirtualNodeSpec {
    pub fn with_backend_defaults(mut self, client_policy: ClientPolicy) -> Self {
        self.backend_defaults = Some(BackendDefaults { client_policy: Some(client_policy) });
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn with_access_log(mut self, access_log: AccessLog) -> Self {
        self.logging = Some(Logging { access_log: Some(access_log) });
        self
    }

    pub fn with_service_discovery(mut self, service_discovery: ServiceDiscovery) -> Self {
        self.service_discovery = Some(service_discovery);
        self
    }

    /// Names of the virtual services this node may call.
    pub fn backend_service_names(&self) -> impl Iterator<Item = &str> {
        self.backends.iter().map(Backend::virtual_service_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNodeStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VirtualNodeStatusCode>,
}

impl VirtualNodeStatus {
    pub fn new(status: VirtualNodeStatusCode) -> Self {
        Self { status: Some(status) }
    }
}

/// A virtual node as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNodeData {
    pub mesh_name: String,

    pub metadata: ResourceMetadata,

    pub spec: VirtualNodeSpec,

    pub status: VirtualNodeStatus,

    pub virtual_node_name: String,
}

impl VirtualNodeData {
    pub fn to_ref(&self) -> VirtualNodeRef {
        VirtualNodeRef {
            arn: self.metadata.arn.clone(),
            mesh_name: self.mesh_name.clone(),
            virtual_node_name: self.virtual_node_name.clone(),
        }
    }
}

/// Summary of a virtual node in list results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNodeRef {
    pub arn: String,

    pub mesh_name: String,

    pub virtual_node_name: String,
}

impl_render_display!(
    HealthCheckPolicy,
    Listener,
    VirtualServiceBackend,
    Backend,
    BackendDefaults,
    FileAccessLog,
    AccessLog,
    Logging,
    AwsCloudMapInstanceAttribute,
    AwsCloudMapServiceDiscovery,
    DnsServiceDiscovery,
    ServiceDiscovery,
    VirtualNodeSpec,
    VirtualNodeStatus,
    VirtualNodeData,
    VirtualNodeRef,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tls::{ListenerTlsCertificate, ListenerTls};
    use serde_json::json;

    fn sample_spec() -> VirtualNodeSpec {
        VirtualNodeSpec::default()
            .with_listener(
                Listener::new(PortMapping::http(8080))
                    .with_health_check(HealthCheckPolicy::new(PortProtocol::Http).with_path("/ping"))
                    .with_tls(ListenerTls::strict(ListenerTlsCertificate::file("/c.pem", "/k.pem"))),
            )
            .with_backend(Backend::virtual_service("payments.local"))
            .with_service_discovery(ServiceDiscovery::dns("orders.local"))
            .with_access_log(AccessLog::file("/dev/stdout"))
    }

    #[test]
    fn spec_wire_shape() {
        let json = serde_json::to_value(sample_spec()).unwrap();
        assert_eq!(json["listeners"][0]["portMapping"], json!({"port": 8080, "protocol": "http"}));
        assert_eq!(json["backends"][0], json!({"virtualService": {"virtualServiceName": "payments.local"}}));
        assert_eq!(json["serviceDiscovery"], json!({"dns": {"hostname": "orders.local"}}));
        assert_eq!(json["logging"], json!({"accessLog": {"file": {"path": "/dev/stdout"}}}));
        assert!(json.get("backendDefaults").is_none());
    }

    #[test]
    fn spec_decodes_from_wire() {
        let doc = json!({
            "listeners": [{
                "portMapping": {"port": 9090, "protocol": "grpc"},
                "timeout": {"grpc": {"perRequest": {"unit": "s", "value": 5}}}
            }],
            "serviceDiscovery": {
                "awsCloudMap": {
                    "namespaceName": "prod",
                    "serviceName": "orders",
                    "attributes": [{"key": "stage", "value": "canary"}]
                }
            }
        });
        let spec: VirtualNodeSpec = serde_json::from_value(doc).unwrap();
        assert_eq!(spec.listeners[0].port_mapping.protocol, PortProtocol::Grpc);
        match spec.service_discovery {
            Some(ServiceDiscovery::AwsCloudMap(cloud_map)) => {
                assert_eq!(cloud_map.attributes.len(), 1);
                assert_eq!(cloud_map.service_name, "orders");
            }
            other => panic!("unexpected discovery: {other:?}"),
        }
    }

    #[test]
    fn backend_service_names() {
        let spec = sample_spec().with_backend(Backend::virtual_service("ledger.local"));
        let names: Vec<&str> = spec.backend_service_names().collect();
        assert_eq!(names, vec!["payments.local", "ledger.local"]);
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(sample_spec(), sample_spec());
        let mut changed = sample_spec();
        changed.listeners[0].port_mapping.port = 8081;
        assert_ne!(sample_spec(), changed);
    }
}
