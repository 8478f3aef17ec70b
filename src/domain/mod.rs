//! Domain layer
//!
//! Value types describing a service mesh configuration: meshes, virtual
//! nodes, virtual routers, virtual services and routes, plus the listener,
//! TLS, timeout and tag types they share.
//!
//! ## Design Principles
//!
//! - **Plain data**: every type is an owned, `Send + Sync` value with
//!   structural equality and hashing
//! - **Unions are enums**: one-of fields (TLS certificate, validation trust,
//!   virtual service provider, route flavour...) cannot hold two branches
//! - **No local validation**: documented bounds are enforced by the service
//!   side, see [`crate::validation`]
//!
//! ## Module Organization
//!
//! - `enums`: closed wire enumerations with strict lookup
//! - `common`: durations, port mappings, ranges, weighted targets, tags, metadata
//! - `tls`: listener certificates and client TLS policy
//! - `timeout`: per-protocol timeouts
//! - `mesh`, `virtual_node`, `virtual_router`, `virtual_service`, `route`: resources

pub mod common;
pub mod enums;
pub mod mesh;
pub(crate) mod render;
pub mod route;
pub mod timeout;
pub mod tls;
pub mod virtual_node;
pub mod virtual_router;
pub mod virtual_service;

pub use common::{
    total_weight, Duration, MatchRange, PortMapping, ResourceMetadata, TagRef, WeightedTarget,
};
pub use enums::{
    DurationUnit, EgressFilterType, GrpcRetryPolicyEvent, HttpMethod, HttpScheme,
    ListenerTlsMode, MeshStatusCode, PortProtocol, RouteStatusCode, TcpRetryPolicyEvent,
    VirtualNodeStatusCode, VirtualRouterStatusCode, VirtualServiceStatusCode,
};
pub use mesh::{EgressFilter, MeshData, MeshRef, MeshSpec, MeshStatus};
pub use route::{
    GrpcRetryPolicy, GrpcRoute, GrpcRouteAction, GrpcRouteMatch, GrpcRouteMetadata,
    GrpcRouteMetadataMatchMethod, HeaderMatchMethod, HttpRetryPolicy, HttpRoute, HttpRouteAction,
    HttpRouteHeader, HttpRouteMatch, RouteData, RouteRef, RouteSpec, RouteStatus, RouteType,
    TcpRoute, TcpRouteAction, HTTP_RETRY_EVENTS,
};
pub use timeout::{GrpcTimeout, HttpTimeout, ListenerTimeout, TcpTimeout};
pub use tls::{
    ClientPolicy, ClientPolicyTls, ListenerTls, ListenerTlsAcmCertificate,
    ListenerTlsCertificate, ListenerTlsFileCertificate, TlsValidationContext,
    TlsValidationContextAcmTrust, TlsValidationContextFileTrust, TlsValidationContextTrust,
};
pub use virtual_node::{
    AccessLog, AwsCloudMapInstanceAttribute, AwsCloudMapServiceDiscovery, Backend,
    BackendDefaults, DnsServiceDiscovery, FileAccessLog, HealthCheckPolicy, Listener, Logging,
    ServiceDiscovery, VirtualNodeData, VirtualNodeRef, VirtualNodeSpec, VirtualNodeStatus,
    VirtualServiceBackend,
};
pub use virtual_router::{
    VirtualRouterData, VirtualRouterListener, VirtualRouterRef, VirtualRouterSpec,
    VirtualRouterStatus,
};
pub use virtual_service::{
    VirtualNodeServiceProvider, VirtualRouterServiceProvider, VirtualServiceData,
    VirtualServiceProvider, VirtualServiceRef, VirtualServiceSpec, VirtualServiceStatus,
};
