//! # In-memory backend
//!
//! A process-local [`AppMesh`] implementation. All resources live in a
//! [`Registry`] behind an async `RwLock`; reads share the lock, mutations
//! take it exclusively so every operation observes a consistent mesh.
//!
//! The backend enforces the referential rules a real control plane
//! enforces: children need their parents, routes and virtual services need
//! their targets, and nothing can be deleted while something depends on it.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn, Instrument, Span};
use uuid::Uuid;

use super::{AppMesh, ArnBuilder};
use crate::api::{
    CreateMeshRequest, CreateMeshResult, CreateRouteRequest, CreateRouteResult,
    CreateVirtualNodeRequest, CreateVirtualNodeResult, CreateVirtualRouterRequest,
    CreateVirtualRouterResult, CreateVirtualServiceRequest, CreateVirtualServiceResult,
    DeleteMeshRequest, DeleteMeshResult, DeleteRouteRequest, DeleteRouteResult,
    DeleteVirtualNodeRequest, DeleteVirtualNodeResult, DeleteVirtualRouterRequest,
    DeleteVirtualRouterResult, DeleteVirtualServiceRequest, DeleteVirtualServiceResult,
    DescribeMeshRequest, DescribeMeshResult, DescribeRouteRequest, DescribeRouteResult,
    DescribeVirtualNodeRequest, DescribeVirtualNodeResult, DescribeVirtualRouterRequest,
    DescribeVirtualRouterResult, DescribeVirtualServiceRequest, DescribeVirtualServiceResult,
    ListMeshesRequest, ListMeshesResult, ListRoutesRequest, ListRoutesResult,
    ListTagsForResourceRequest, ListTagsForResourceResult, ListVirtualNodesRequest,
    ListVirtualNodesResult, ListVirtualRoutersRequest, ListVirtualRoutersResult,
    ListVirtualServicesRequest, ListVirtualServicesResult, Page, TagResourceRequest,
    TagResourceResult, UntagResourceRequest, UntagResourceResult, UpdateMeshRequest,
    UpdateMeshResult, UpdateRouteRequest, UpdateRouteResult, UpdateVirtualNodeRequest,
    UpdateVirtualNodeResult, UpdateVirtualRouterRequest, UpdateVirtualRouterResult,
    UpdateVirtualServiceRequest, UpdateVirtualServiceResult, MAX_TAG_LIST_LIMIT,
};
use crate::config::{AppConfig, ServiceConfig};
use crate::domain::{
    MeshData, MeshRef, MeshSpec, MeshStatus, MeshStatusCode, ResourceMetadata, RouteData,
    RouteRef, RouteSpec, RouteStatus, RouteStatusCode, TagRef, VirtualNodeData, VirtualNodeRef,
    VirtualNodeSpec, VirtualNodeStatus, VirtualNodeStatusCode, VirtualRouterData,
    VirtualRouterRef, VirtualRouterSpec, VirtualRouterStatus, VirtualRouterStatusCode,
    VirtualServiceData, VirtualServiceProvider, VirtualServiceRef, VirtualServiceSpec,
    VirtualServiceStatus, VirtualServiceStatusCode,
};
use crate::errors::{AppMeshError, Result};
use crate::validation::{
    validate_request, validate_route_spec, validate_virtual_node_spec,
    validate_virtual_router_spec, validate_virtual_service_spec,
};

const MESH: &str = "mesh";
const VIRTUAL_NODE: &str = "virtualNode";
const VIRTUAL_ROUTER: &str = "virtualRouter";
const VIRTUAL_SERVICE: &str = "virtualService";
const ROUTE: &str = "route";
const RESOURCE: &str = "resource";

/// Process-local mesh backend.
#[derive(Debug)]
pub struct InMemoryAppMesh {
    config: ServiceConfig,
    registry: RwLock<Registry>,
}

impl InMemoryAppMesh {
    pub fn new(config: ServiceConfig) -> Self {
        let registry = RwLock::new(Registry::new(&config));
        Self { config, registry }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.service.clone())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

impl Default for InMemoryAppMesh {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

/// Run an operation inside its span, logging rejections there.
async fn traced<T, F>(span: Span, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    async move {
        operation.await.inspect_err(|error| {
            warn!(error_code = error.error_code(), error = %error, "Request rejected");
        })
    }
    .instrument(span)
    .await
}

#[derive(Debug)]
struct RouterEntry {
    router: VirtualRouterData,
    routes: BTreeMap<String, RouteData>,
}

impl RouterEntry {
    fn route(&self, route_name: &str) -> Result<&RouteData> {
        self.routes.get(route_name).ok_or_else(|| AppMeshError::not_found(ROUTE, route_name))
    }

    /// Routes must speak the protocol of the router's listener.
    fn check_route_protocol(&self, spec: &RouteSpec) -> Result<()> {
        check_listener_protocol(&self.router.spec, spec)
    }
}

fn check_listener_protocol(router: &VirtualRouterSpec, spec: &RouteSpec) -> Result<()> {
    let route_protocol = spec.route.protocol();
    match router.listeners.first() {
        Some(listener) if listener.port_mapping.protocol != route_protocol => {
            Err(AppMeshError::bad_request_field(
                format!(
                    "{} route does not match virtual router listener protocol {}",
                    route_protocol, listener.port_mapping.protocol
                ),
                "spec",
            ))
        }
        _ => Ok(()),
    }
}

#[derive(Debug)]
struct MeshEntry {
    mesh: MeshData,
    virtual_nodes: BTreeMap<String, VirtualNodeData>,
    virtual_routers: BTreeMap<String, RouterEntry>,
    virtual_services: BTreeMap<String, VirtualServiceData>,
}

impl MeshEntry {
    fn new(mesh: MeshData) -> Self {
        Self {
            mesh,
            virtual_nodes: BTreeMap::new(),
            virtual_routers: BTreeMap::new(),
            virtual_services: BTreeMap::new(),
        }
    }

    fn resource_count(&self) -> usize {
        self.virtual_nodes.len() + self.virtual_routers.len() + self.virtual_services.len()
    }

    fn virtual_node(&self, virtual_node_name: &str) -> Result<&VirtualNodeData> {
        self.virtual_nodes
            .get(virtual_node_name)
            .ok_or_else(|| AppMeshError::not_found(VIRTUAL_NODE, virtual_node_name))
    }

    fn router(&self, virtual_router_name: &str) -> Result<&RouterEntry> {
        self.virtual_routers
            .get(virtual_router_name)
            .ok_or_else(|| AppMeshError::not_found(VIRTUAL_ROUTER, virtual_router_name))
    }

    fn router_mut(&mut self, virtual_router_name: &str) -> Result<&mut RouterEntry> {
        self.virtual_routers
            .get_mut(virtual_router_name)
            .ok_or_else(|| AppMeshError::not_found(VIRTUAL_ROUTER, virtual_router_name))
    }

    fn virtual_service(&self, virtual_service_name: &str) -> Result<&VirtualServiceData> {
        self.virtual_services
            .get(virtual_service_name)
            .ok_or_else(|| AppMeshError::not_found(VIRTUAL_SERVICE, virtual_service_name))
    }

    /// Names of the virtual services whose provider matches `is_provider`.
    fn services_provided_by<P>(&self, is_provider: P) -> Vec<String>
    where
        P: Fn(&VirtualServiceProvider) -> bool,
    {
        self.virtual_services
            .values()
            .filter(|service| service.spec.provider.as_ref().is_some_and(|p| is_provider(p)))
            .map(|service| service.virtual_service_name.clone())
            .collect()
    }

    fn check_route_targets(&self, spec: &RouteSpec) -> Result<()> {
        for target in spec.route.weighted_targets() {
            self.virtual_node(&target.virtual_node)?;
        }
        Ok(())
    }

    fn check_provider(&self, spec: &VirtualServiceSpec) -> Result<()> {
        match &spec.provider {
            Some(VirtualServiceProvider::VirtualNode(provider)) => {
                self.virtual_node(&provider.virtual_node_name).map(|_| ())
            }
            Some(VirtualServiceProvider::VirtualRouter(provider)) => {
                self.router(&provider.virtual_router_name).map(|_| ())
            }
            None => Ok(()),
        }
    }
}

/// Every resource, tag set and client token known to the backend.
#[derive(Debug)]
struct Registry {
    arns: ArnBuilder,
    max_tags_per_resource: usize,
    meshes: BTreeMap<String, MeshEntry>,
    /// Keyed by resource ARN; an entry exists for every live resource
    tags: HashMap<String, Vec<TagRef>>,
    client_tokens: HashMap<String, String>,
}

fn merge_tags(existing: &mut Vec<TagRef>, tags: Vec<TagRef>) {
    for tag in tags {
        match existing.iter_mut().find(|current| current.key == tag.key) {
            Some(slot) => *slot = tag,
            None => existing.push(tag),
        }
    }
}

fn new_metadata(arn: String) -> ResourceMetadata {
    ResourceMetadata::new(arn, Uuid::new_v4().to_string(), Utc::now())
}

impl Registry {
    fn new(config: &ServiceConfig) -> Self {
        Self {
            arns: ArnBuilder::new(config),
            max_tags_per_resource: config.max_tags_per_resource,
            meshes: BTreeMap::new(),
            tags: HashMap::new(),
            client_tokens: HashMap::new(),
        }
    }

    fn mesh(&self, mesh_name: &str) -> Result<&MeshEntry> {
        self.meshes.get(mesh_name).ok_or_else(|| AppMeshError::not_found(MESH, mesh_name))
    }

    fn mesh_mut(&mut self, mesh_name: &str) -> Result<&mut MeshEntry> {
        self.meshes.get_mut(mesh_name).ok_or_else(|| AppMeshError::not_found(MESH, mesh_name))
    }

    /// A create for an existing name succeeds only as a retry carrying the
    /// same client token as the original request.
    fn replay_or_conflict(
        &self,
        arn: &str,
        client_token: Option<&str>,
        resource_type: &str,
        name: &str,
    ) -> Result<()> {
        let is_replay = client_token
            .is_some_and(|token| self.client_tokens.get(arn).is_some_and(|stored| stored == token));
        if is_replay {
            debug!(arn = %arn, "Replaying create for matching client token");
            return Ok(());
        }
        Err(AppMeshError::conflict(
            format!("{} '{}' already exists", resource_type, name),
            resource_type,
        ))
    }

    fn register(&mut self, arn: &str, client_token: Option<String>, tags: Vec<TagRef>) -> Result<()> {
        if self.tags.contains_key(arn) {
            return Err(AppMeshError::conflict(format!("ARN '{}' is already in use", arn), RESOURCE));
        }
        let mut merged = Vec::with_capacity(tags.len());
        merge_tags(&mut merged, tags);
        if merged.len() > self.max_tags_per_resource {
            return Err(AppMeshError::too_many_tags(
                arn,
                merged.len(),
                self.max_tags_per_resource,
            ));
        }
        self.tags.insert(arn.to_string(), merged);
        if let Some(token) = client_token {
            self.client_tokens.insert(arn.to_string(), token);
        }
        Ok(())
    }

    fn forget(&mut self, arn: &str) {
        self.tags.remove(arn);
        self.client_tokens.remove(arn);
    }

    // Meshes

    fn create_mesh(&mut self, request: CreateMeshRequest) -> Result<MeshData> {
        let arn = self.arns.mesh(&request.mesh_name);
        if let Some(entry) = self.meshes.get(&request.mesh_name) {
            self.replay_or_conflict(&arn, request.client_token.as_deref(), MESH, &request.mesh_name)?;
            return Ok(entry.mesh.clone());
        }

        self.register(&arn, request.client_token, request.tags)?;
        let mesh = MeshData {
            mesh_name: request.mesh_name.clone(),
            metadata: new_metadata(arn),
            spec: request.spec.unwrap_or_default(),
            status: MeshStatus::new(MeshStatusCode::Active),
        };
        self.meshes.insert(request.mesh_name, MeshEntry::new(mesh.clone()));

        info!(arn = %mesh.metadata.arn, "Mesh created");
        Ok(mesh)
    }

    fn update_mesh(&mut self, mesh_name: &str, spec: MeshSpec) -> Result<MeshData> {
        let entry = self.mesh_mut(mesh_name)?;
        entry.mesh.spec = spec;
        entry.mesh.metadata = entry.mesh.metadata.bumped(Utc::now());

        info!(version = entry.mesh.metadata.version, "Mesh updated");
        Ok(entry.mesh.clone())
    }

    fn delete_mesh(&mut self, mesh_name: &str) -> Result<MeshData> {
        let remaining = self.mesh(mesh_name)?.resource_count();
        if remaining > 0 {
            return Err(AppMeshError::resource_in_use(
                MESH,
                mesh_name,
                format!("mesh still contains {} resources", remaining),
            ));
        }

        let mut mesh = match self.meshes.remove(mesh_name) {
            Some(entry) => entry.mesh,
            None => return Err(AppMeshError::not_found(MESH, mesh_name)),
        };
        self.forget(&mesh.metadata.arn);
        mesh.status = MeshStatus::new(MeshStatusCode::Deleted);

        info!(arn = %mesh.metadata.arn, "Mesh deleted");
        Ok(mesh)
    }

    fn list_meshes(&self) -> Vec<MeshRef> {
        self.meshes.values().map(|entry| entry.mesh.to_ref()).collect()
    }

    // Virtual nodes

    fn create_virtual_node(&mut self, request: CreateVirtualNodeRequest) -> Result<VirtualNodeData> {
        let arn = self.arns.virtual_node(&request.mesh_name, &request.virtual_node_name);
        let mesh = self.mesh(&request.mesh_name)?;
        if let Some(existing) = mesh.virtual_nodes.get(&request.virtual_node_name) {
            self.replay_or_conflict(
                &arn,
                request.client_token.as_deref(),
                VIRTUAL_NODE,
                &request.virtual_node_name,
            )?;
            return Ok(existing.clone());
        }

        self.register(&arn, request.client_token, request.tags)?;
        let node = VirtualNodeData {
            mesh_name: request.mesh_name.clone(),
            metadata: new_metadata(arn),
            spec: request.spec,
            status: VirtualNodeStatus::new(VirtualNodeStatusCode::Active),
            virtual_node_name: request.virtual_node_name.clone(),
        };
        self.mesh_mut(&request.mesh_name)?
            .virtual_nodes
            .insert(request.virtual_node_name, node.clone());

        info!(arn = %node.metadata.arn, "Virtual node created");
        Ok(node)
    }

    fn update_virtual_node(
        &mut self,
        mesh_name: &str,
        virtual_node_name: &str,
        spec: VirtualNodeSpec,
    ) -> Result<VirtualNodeData> {
        let node = self
            .mesh_mut(mesh_name)?
            .virtual_nodes
            .get_mut(virtual_node_name)
            .ok_or_else(|| AppMeshError::not_found(VIRTUAL_NODE, virtual_node_name))?;
        node.spec = spec;
        node.metadata = node.metadata.bumped(Utc::now());

        info!(version = node.metadata.version, "Virtual node updated");
        Ok(node.clone())
    }

    fn delete_virtual_node(&mut self, mesh_name: &str, virtual_node_name: &str) -> Result<VirtualNodeData> {
        let mesh = self.mesh(mesh_name)?;
        mesh.virtual_node(virtual_node_name)?;

        let providing = mesh.services_provided_by(|provider| {
            provider.virtual_node_name() == Some(virtual_node_name)
        });
        if !providing.is_empty() {
            return Err(AppMeshError::resource_in_use(
                VIRTUAL_NODE,
                virtual_node_name,
                format!("virtual node provides virtual services: {}", providing.join(", ")),
            ));
        }

        let mut node = self
            .mesh_mut(mesh_name)?
            .virtual_nodes
            .remove(virtual_node_name)
            .ok_or_else(|| AppMeshError::not_found(VIRTUAL_NODE, virtual_node_name))?;
        self.forget(&node.metadata.arn);
        node.status = VirtualNodeStatus::new(VirtualNodeStatusCode::Deleted);

        info!(arn = %node.metadata.arn, "Virtual node deleted");
        Ok(node)
    }

    fn list_virtual_nodes(&self, mesh_name: &str) -> Result<Vec<VirtualNodeRef>> {
        Ok(self.mesh(mesh_name)?.virtual_nodes.values().map(VirtualNodeData::to_ref).collect())
    }

    // Virtual routers

    fn create_virtual_router(
        &mut self,
        request: CreateVirtualRouterRequest,
    ) -> Result<VirtualRouterData> {
        let arn = self.arns.virtual_router(&request.mesh_name, &request.virtual_router_name);
        let mesh = self.mesh(&request.mesh_name)?;
        if let Some(existing) = mesh.virtual_routers.get(&request.virtual_router_name) {
            self.replay_or_conflict(
                &arn,
                request.client_token.as_deref(),
                VIRTUAL_ROUTER,
                &request.virtual_router_name,
            )?;
            return Ok(existing.router.clone());
        }

        self.register(&arn, request.client_token, request.tags)?;
        let router = VirtualRouterData {
            mesh_name: request.mesh_name.clone(),
            metadata: new_metadata(arn),
            spec: request.spec,
            status: VirtualRouterStatus::new(VirtualRouterStatusCode::Active),
            virtual_router_name: request.virtual_router_name.clone(),
        };
        self.mesh_mut(&request.mesh_name)?.virtual_routers.insert(
            request.virtual_router_name,
            RouterEntry { router: router.clone(), routes: BTreeMap::new() },
        );

        info!(arn = %router.metadata.arn, "Virtual router created");
        Ok(router)
    }

    fn update_virtual_router(
        &mut self,
        mesh_name: &str,
        virtual_router_name: &str,
        spec: VirtualRouterSpec,
    ) -> Result<VirtualRouterData> {
        let entry = self.mesh_mut(mesh_name)?.router_mut(virtual_router_name)?;
        for route in entry.routes.values() {
            check_listener_protocol(&spec, &route.spec).map_err(|_| {
                AppMeshError::bad_request_field(
                    format!(
                        "listener protocol does not match existing route '{}'",
                        route.route_name
                    ),
                    "spec.listeners",
                )
            })?;
        }
        entry.router.spec = spec;
        entry.router.metadata = entry.router.metadata.bumped(Utc::now());

        info!(version = entry.router.metadata.version, "Virtual router updated");
        Ok(entry.router.clone())
    }

    fn delete_virtual_router(
        &mut self,
        mesh_name: &str,
        virtual_router_name: &str,
    ) -> Result<VirtualRouterData> {
        let mesh = self.mesh(mesh_name)?;
        let routes = mesh.router(virtual_router_name)?.routes.len();
        if routes > 0 {
            return Err(AppMeshError::resource_in_use(
                VIRTUAL_ROUTER,
                virtual_router_name,
                format!("virtual router still has {} routes", routes),
            ));
        }

        let providing = mesh.services_provided_by(|provider| {
            provider.virtual_router_name() == Some(virtual_router_name)
        });
        if !providing.is_empty() {
            return Err(AppMeshError::resource_in_use(
                VIRTUAL_ROUTER,
                virtual_router_name,
                format!("virtual router provides virtual services: {}", providing.join(", ")),
            ));
        }

        let mut router = match self.mesh_mut(mesh_name)?.virtual_routers.remove(virtual_router_name) {
            Some(entry) => entry.router,
            None => return Err(AppMeshError::not_found(VIRTUAL_ROUTER, virtual_router_name)),
        };
        self.forget(&router.metadata.arn);
        router.status = VirtualRouterStatus::new(VirtualRouterStatusCode::Deleted);

        info!(arn = %router.metadata.arn, "Virtual router deleted");
        Ok(router)
    }

    fn list_virtual_routers(&self, mesh_name: &str) -> Result<Vec<VirtualRouterRef>> {
        Ok(self.mesh(mesh_name)?.virtual_routers.values().map(|entry| entry.router.to_ref()).collect())
    }

    // Virtual services

    fn create_virtual_service(
        &mut self,
        request: CreateVirtualServiceRequest,
    ) -> Result<VirtualServiceData> {
        let arn = self.arns.virtual_service(&request.mesh_name, &request.virtual_service_name);
        let mesh = self.mesh(&request.mesh_name)?;
        if let Some(existing) = mesh.virtual_services.get(&request.virtual_service_name) {
            self.replay_or_conflict(
                &arn,
                request.client_token.as_deref(),
                VIRTUAL_SERVICE,
                &request.virtual_service_name,
            )?;
            return Ok(existing.clone());
        }
        mesh.check_provider(&request.spec)?;

        self.register(&arn, request.client_token, request.tags)?;
        let service = VirtualServiceData {
            mesh_name: request.mesh_name.clone(),
            metadata: new_metadata(arn),
            spec: request.spec,
            status: VirtualServiceStatus::new(VirtualServiceStatusCode::Active),
            virtual_service_name: request.virtual_service_name.clone(),
        };
        self.mesh_mut(&request.mesh_name)?
            .virtual_services
            .insert(request.virtual_service_name, service.clone());

        info!(arn = %service.metadata.arn, "Virtual service created");
        Ok(service)
    }

    fn update_virtual_service(
        &mut self,
        mesh_name: &str,
        virtual_service_name: &str,
        spec: VirtualServiceSpec,
    ) -> Result<VirtualServiceData> {
        let mesh = self.mesh_mut(mesh_name)?;
        mesh.virtual_service(virtual_service_name)?;
        mesh.check_provider(&spec)?;

        let service = mesh
            .virtual_services
            .get_mut(virtual_service_name)
            .ok_or_else(|| AppMeshError::not_found(VIRTUAL_SERVICE, virtual_service_name))?;
        service.spec = spec;
        service.metadata = service.metadata.bumped(Utc::now());

        info!(version = service.metadata.version, "Virtual service updated");
        Ok(service.clone())
    }

    fn delete_virtual_service(
        &mut self,
        mesh_name: &str,
        virtual_service_name: &str,
    ) -> Result<VirtualServiceData> {
        let mut service = self
            .mesh_mut(mesh_name)?
            .virtual_services
            .remove(virtual_service_name)
            .ok_or_else(|| AppMeshError::not_found(VIRTUAL_SERVICE, virtual_service_name))?;
        self.forget(&service.metadata.arn);
        service.status = VirtualServiceStatus::new(VirtualServiceStatusCode::Deleted);

        info!(arn = %service.metadata.arn, "Virtual service deleted");
        Ok(service)
    }

    fn list_virtual_services(&self, mesh_name: &str) -> Result<Vec<VirtualServiceRef>> {
        Ok(self
            .mesh(mesh_name)?
            .virtual_services
            .values()
            .map(VirtualServiceData::to_ref)
            .collect())
    }

    // Routes

    fn create_route(&mut self, request: CreateRouteRequest) -> Result<RouteData> {
        let arn =
            self.arns.route(&request.mesh_name, &request.virtual_router_name, &request.route_name);
        let mesh = self.mesh(&request.mesh_name)?;
        let router = mesh.router(&request.virtual_router_name)?;
        if let Some(existing) = router.routes.get(&request.route_name) {
            self.replay_or_conflict(
                &arn,
                request.client_token.as_deref(),
                ROUTE,
                &request.route_name,
            )?;
            return Ok(existing.clone());
        }
        router.check_route_protocol(&request.spec)?;
        mesh.check_route_targets(&request.spec)?;

        self.register(&arn, request.client_token, request.tags)?;
        let route = RouteData {
            mesh_name: request.mesh_name.clone(),
            metadata: new_metadata(arn),
            route_name: request.route_name.clone(),
            spec: request.spec,
            status: RouteStatus::new(RouteStatusCode::Active),
            virtual_router_name: request.virtual_router_name.clone(),
        };
        self.mesh_mut(&request.mesh_name)?
            .router_mut(&request.virtual_router_name)?
            .routes
            .insert(request.route_name, route.clone());

        info!(arn = %route.metadata.arn, "Route created");
        Ok(route)
    }

    fn update_route(
        &mut self,
        mesh_name: &str,
        virtual_router_name: &str,
        route_name: &str,
        spec: RouteSpec,
    ) -> Result<RouteData> {
        let mesh = self.mesh_mut(mesh_name)?;
        let router = mesh.router(virtual_router_name)?;
        router.route(route_name)?;
        router.check_route_protocol(&spec)?;
        mesh.check_route_targets(&spec)?;

        let route = mesh
            .router_mut(virtual_router_name)?
            .routes
            .get_mut(route_name)
            .ok_or_else(|| AppMeshError::not_found(ROUTE, route_name))?;
        route.spec = spec;
        route.metadata = route.metadata.bumped(Utc::now());

        info!(version = route.metadata.version, "Route updated");
        Ok(route.clone())
    }

    fn delete_route(
        &mut self,
        mesh_name: &str,
        virtual_router_name: &str,
        route_name: &str,
    ) -> Result<RouteData> {
        let mut route = self
            .mesh_mut(mesh_name)?
            .router_mut(virtual_router_name)?
            .routes
            .remove(route_name)
            .ok_or_else(|| AppMeshError::not_found(ROUTE, route_name))?;
        self.forget(&route.metadata.arn);
        route.status = RouteStatus::new(RouteStatusCode::Deleted);

        info!(arn = %route.metadata.arn, "Route deleted");
        Ok(route)
    }

    fn list_routes(&self, mesh_name: &str, virtual_router_name: &str) -> Result<Vec<RouteRef>> {
        Ok(self
            .mesh(mesh_name)?
            .router(virtual_router_name)?
            .routes
            .values()
            .map(RouteData::to_ref)
            .collect())
    }

    // Tags

    /// Tags of a live resource, sorted by key.
    fn list_tags(&self, resource_arn: &str) -> Result<Vec<TagRef>> {
        let mut tags = self
            .tags
            .get(resource_arn)
            .cloned()
            .ok_or_else(|| AppMeshError::not_found(RESOURCE, resource_arn))?;
        tags.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(tags)
    }

    fn tag_resource(&mut self, resource_arn: &str, tags: Vec<TagRef>) -> Result<usize> {
        let max = self.max_tags_per_resource;
        let existing = self
            .tags
            .get_mut(resource_arn)
            .ok_or_else(|| AppMeshError::not_found(RESOURCE, resource_arn))?;

        let mut merged = existing.clone();
        merge_tags(&mut merged, tags);
        if merged.len() > max {
            return Err(AppMeshError::too_many_tags(resource_arn, merged.len(), max));
        }
        *existing = merged;

        info!(tag_count = existing.len(), "Resource tagged");
        Ok(existing.len())
    }

    fn untag_resource(&mut self, resource_arn: &str, tag_keys: &[String]) -> Result<usize> {
        let existing = self
            .tags
            .get_mut(resource_arn)
            .ok_or_else(|| AppMeshError::not_found(RESOURCE, resource_arn))?;

        let before = existing.len();
        existing.retain(|tag| !tag_keys.contains(&tag.key));
        let removed = before - existing.len();

        info!(removed, tag_count = existing.len(), "Resource untagged");
        Ok(removed)
    }
}

#[async_trait]
impl AppMesh for InMemoryAppMesh {
    async fn create_mesh(&self, request: CreateMeshRequest) -> Result<CreateMeshResult> {
        let span = crate::operation_span!("CreateMesh", mesh_name = %request.mesh_name);
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry.create_mesh(request).map(|mesh| CreateMeshResult { mesh })
        })
        .await
    }

    async fn describe_mesh(&self, request: DescribeMeshRequest) -> Result<DescribeMeshResult> {
        let span = crate::operation_span!("DescribeMesh", mesh_name = %request.mesh_name);
        traced(span, async move {
            validate_request(&request)?;
            let registry = self.registry.read().await;
            let mesh = registry.mesh(&request.mesh_name)?.mesh.clone();
            debug!(version = mesh.metadata.version, "Mesh described");
            Ok::<_, AppMeshError>(DescribeMeshResult { mesh })
        })
        .await
    }

    async fn update_mesh(&self, request: UpdateMeshRequest) -> Result<UpdateMeshResult> {
        let span = crate::operation_span!("UpdateMesh", mesh_name = %request.mesh_name);
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry
                .update_mesh(&request.mesh_name, request.spec.unwrap_or_default())
                .map(|mesh| UpdateMeshResult { mesh })
        })
        .await
    }

    async fn delete_mesh(&self, request: DeleteMeshRequest) -> Result<DeleteMeshResult> {
        let span = crate::operation_span!("DeleteMesh", mesh_name = %request.mesh_name);
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry.delete_mesh(&request.mesh_name).map(|mesh| DeleteMeshResult { mesh })
        })
        .await
    }

    async fn list_meshes(&self, request: ListMeshesRequest) -> Result<ListMeshesResult> {
        let span = crate::operation_span!("ListMeshes");
        let limit = self.config.page_limit(request.limit);
        traced(span, async move {
            validate_request(&request)?;
            let meshes = self.registry.read().await.list_meshes();
            let page = Page::paginate(
                meshes,
                |mesh| mesh.mesh_name.as_str(),
                limit,
                request.next_token.as_deref(),
            )?;
            debug!(count = page.items.len(), "Meshes listed");
            Ok::<_, AppMeshError>(ListMeshesResult { meshes: page.items, next_token: page.next_token })
        })
        .await
    }

    async fn create_virtual_node(
        &self,
        request: CreateVirtualNodeRequest,
    ) -> Result<CreateVirtualNodeResult> {
        let span = crate::operation_span!(
            "CreateVirtualNode",
            mesh_name = %request.mesh_name,
            virtual_node_name = %request.virtual_node_name
        );
        traced(span, async move {
            validate_request(&request)?;
            validate_virtual_node_spec(&request.spec)?;
            let mut registry = self.registry.write().await;
            registry
                .create_virtual_node(request)
                .map(|virtual_node| CreateVirtualNodeResult { virtual_node })
        })
        .await
    }

    async fn describe_virtual_node(
        &self,
        request: DescribeVirtualNodeRequest,
    ) -> Result<DescribeVirtualNodeResult> {
        let span = crate::operation_span!(
            "DescribeVirtualNode",
            mesh_name = %request.mesh_name,
            virtual_node_name = %request.virtual_node_name
        );
        traced(span, async move {
            validate_request(&request)?;
            let registry = self.registry.read().await;
            let virtual_node = registry
                .mesh(&request.mesh_name)?
                .virtual_node(&request.virtual_node_name)?
                .clone();
            debug!(version = virtual_node.metadata.version, "Virtual node described");
            Ok::<_, AppMeshError>(DescribeVirtualNodeResult { virtual_node })
        })
        .await
    }

    async fn update_virtual_node(
        &self,
        request: UpdateVirtualNodeRequest,
    ) -> Result<UpdateVirtualNodeResult> {
        let span = crate::operation_span!(
            "UpdateVirtualNode",
            mesh_name = %request.mesh_name,
            virtual_node_name = %request.virtual_node_name
        );
        traced(span, async move {
            validate_request(&request)?;
            validate_virtual_node_spec(&request.spec)?;
            let mut registry = self.registry.write().await;
            registry
                .update_virtual_node(&request.mesh_name, &request.virtual_node_name, request.spec)
                .map(|virtual_node| UpdateVirtualNodeResult { virtual_node })
        })
        .await
    }

    async fn delete_virtual_node(
        &self,
        request: DeleteVirtualNodeRequest,
    ) -> Result<DeleteVirtualNodeResult> {
        let span = crate::operation_span!(
            "DeleteVirtualNode",
            mesh_name = %request.mesh_name,
            virtual_node_name = %request.virtual_node_name
        );
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry
                .delete_virtual_node(&request.mesh_name, &request.virtual_node_name)
                .map(|virtual_node| DeleteVirtualNodeResult { virtual_node })
        })
        .await
    }

    async fn list_virtual_nodes(
        &self,
        request: ListVirtualNodesRequest,
    ) -> Result<ListVirtualNodesResult> {
        let span = crate::operation_span!("ListVirtualNodes", mesh_name = %request.mesh_name);
        let limit = self.config.page_limit(request.limit);
        traced(span, async move {
            validate_request(&request)?;
            let nodes = self.registry.read().await.list_virtual_nodes(&request.mesh_name)?;
            let page = Page::paginate(
                nodes,
                |node| node.virtual_node_name.as_str(),
                limit,
                request.next_token.as_deref(),
            )?;
            debug!(count = page.items.len(), "Virtual nodes listed");
            Ok::<_, AppMeshError>(ListVirtualNodesResult {
                next_token: page.next_token,
                virtual_nodes: page.items,
            })
        })
        .await
    }

    async fn create_virtual_router(
        &self,
        request: CreateVirtualRouterRequest,
    ) -> Result<CreateVirtualRouterResult> {
        let span = crate::operation_span!(
            "CreateVirtualRouter",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name
        );
        traced(span, async move {
            validate_request(&request)?;
            validate_virtual_router_spec(&request.spec)?;
            let mut registry = self.registry.write().await;
            registry
                .create_virtual_router(request)
                .map(|virtual_router| CreateVirtualRouterResult { virtual_router })
        })
        .await
    }

    async fn describe_virtual_router(
        &self,
        request: DescribeVirtualRouterRequest,
    ) -> Result<DescribeVirtualRouterResult> {
        let span = crate::operation_span!(
            "DescribeVirtualRouter",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name
        );
        traced(span, async move {
            validate_request(&request)?;
            let registry = self.registry.read().await;
            let virtual_router = registry
                .mesh(&request.mesh_name)?
                .router(&request.virtual_router_name)?
                .router
                .clone();
            debug!(version = virtual_router.metadata.version, "Virtual router described");
            Ok::<_, AppMeshError>(DescribeVirtualRouterResult { virtual_router })
        })
        .await
    }

    async fn update_virtual_router(
        &self,
        request: UpdateVirtualRouterRequest,
    ) -> Result<UpdateVirtualRouterResult> {
        let span = crate::operation_span!(
            "UpdateVirtualRouter",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name
        );
        traced(span, async move {
            validate_request(&request)?;
            validate_virtual_router_spec(&request.spec)?;
            let mut registry = self.registry.write().await;
            registry
                .update_virtual_router(&request.mesh_name, &request.virtual_router_name, request.spec)
                .map(|virtual_router| UpdateVirtualRouterResult { virtual_router })
        })
        .await
    }

    async fn delete_virtual_router(
        &self,
        request: DeleteVirtualRouterRequest,
    ) -> Result<DeleteVirtualRouterResult> {
        let span = crate::operation_span!(
            "DeleteVirtualRouter",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name
        );
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry
                .delete_virtual_router(&request.mesh_name, &request.virtual_router_name)
                .map(|virtual_router| DeleteVirtualRouterResult { virtual_router })
        })
        .await
    }

    async fn list_virtual_routers(
        &self,
        request: ListVirtualRoutersRequest,
    ) -> Result<ListVirtualRoutersResult> {
        let span = crate::operation_span!("ListVirtualRouters", mesh_name = %request.mesh_name);
        let limit = self.config.page_limit(request.limit);
        traced(span, async move {
            validate_request(&request)?;
            let routers = self.registry.read().await.list_virtual_routers(&request.mesh_name)?;
            let page = Page::paginate(
                routers,
                |router| router.virtual_router_name.as_str(),
                limit,
                request.next_token.as_deref(),
            )?;
            debug!(count = page.items.len(), "Virtual routers listed");
            Ok::<_, AppMeshError>(ListVirtualRoutersResult {
                next_token: page.next_token,
                virtual_routers: page.items,
            })
        })
        .await
    }

    async fn create_virtual_service(
        &self,
        request: CreateVirtualServiceRequest,
    ) -> Result<CreateVirtualServiceResult> {
        let span = crate::operation_span!(
            "CreateVirtualService",
            mesh_name = %request.mesh_name,
            virtual_service_name = %request.virtual_service_name
        );
        traced(span, async move {
            validate_request(&request)?;
            validate_virtual_service_spec(&request.spec)?;
            let mut registry = self.registry.write().await;
            registry
                .create_virtual_service(request)
                .map(|virtual_service| CreateVirtualServiceResult { virtual_service })
        })
        .await
    }

    async fn describe_virtual_service(
        &self,
        request: DescribeVirtualServiceRequest,
    ) -> Result<DescribeVirtualServiceResult> {
        let span = crate::operation_span!(
            "DescribeVirtualService",
            mesh_name = %request.mesh_name,
            virtual_service_name = %request.virtual_service_name
        );
        traced(span, async move {
            validate_request(&request)?;
            let registry = self.registry.read().await;
            let virtual_service = registry
                .mesh(&request.mesh_name)?
                .virtual_service(&request.virtual_service_name)?
                .clone();
            debug!(version = virtual_service.metadata.version, "Virtual service described");
            Ok::<_, AppMeshError>(DescribeVirtualServiceResult { virtual_service })
        })
        .await
    }

    async fn update_virtual_service(
        &self,
        request: UpdateVirtualServiceRequest,
    ) -> Result<UpdateVirtualServiceResult> {
        let span = crate::operation_span!(
            "UpdateVirtualService",
            mesh_name = %request.mesh_name,
            virtual_service_name = %request.virtual_service_name
        );
        traced(span, async move {
            validate_request(&request)?;
            validate_virtual_service_spec(&request.spec)?;
            let mut registry = self.registry.write().await;
            registry
                .update_virtual_service(
                    &request.mesh_name,
                    &request.virtual_service_name,
                    request.spec,
                )
                .map(|virtual_service| UpdateVirtualServiceResult { virtual_service })
        })
        .await
    }

    async fn delete_virtual_service(
        &self,
        request: DeleteVirtualServiceRequest,
    ) -> Result<DeleteVirtualServiceResult> {
        let span = crate::operation_span!(
            "DeleteVirtualService",
            mesh_name = %request.mesh_name,
            virtual_service_name = %request.virtual_service_name
        );
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry
                .delete_virtual_service(&request.mesh_name, &request.virtual_service_name)
                .map(|virtual_service| DeleteVirtualServiceResult { virtual_service })
        })
        .await
    }

    async fn list_virtual_services(
        &self,
        request: ListVirtualServicesRequest,
    ) -> Result<ListVirtualServicesResult> {
        let span = crate::operation_span!("ListVirtualServices", mesh_name = %request.mesh_name);
        let limit = self.config.page_limit(request.limit);
        traced(span, async move {
            validate_request(&request)?;
            let services = self.registry.read().await.list_virtual_services(&request.mesh_name)?;
            let page = Page::paginate(
                services,
                |service| service.virtual_service_name.as_str(),
                limit,
                request.next_token.as_deref(),
            )?;
            debug!(count = page.items.len(), "Virtual services listed");
            Ok::<_, AppMeshError>(ListVirtualServicesResult {
                next_token: page.next_token,
                virtual_services: page.items,
            })
        })
        .await
    }

    async fn create_route(&self, request: CreateRouteRequest) -> Result<CreateRouteResult> {
        let span = crate::operation_span!(
            "CreateRoute",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name,
            route_name = %request.route_name
        );
        traced(span, async move {
            validate_request(&request)?;
            validate_route_spec(&request.spec)?;
            let mut registry = self.registry.write().await;
            registry.create_route(request).map(|route| CreateRouteResult { route })
        })
        .await
    }

    async fn describe_route(&self, request: DescribeRouteRequest) -> Result<DescribeRouteResult> {
        let span = crate::operation_span!(
            "DescribeRoute",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name,
            route_name = %request.route_name
        );
        traced(span, async move {
            validate_request(&request)?;
            let registry = self.registry.read().await;
            let route = registry
                .mesh(&request.mesh_name)?
                .router(&request.virtual_router_name)?
                .route(&request.route_name)?
                .clone();
            debug!(version = route.metadata.version, "Route described");
            Ok::<_, AppMeshError>(DescribeRouteResult { route })
        })
        .await
    }

    async fn update_route(&self, request: UpdateRouteRequest) -> Result<UpdateRouteResult> {
        let span = crate::operation_span!(
            "UpdateRoute",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name,
            route_name = %request.route_name
        );
        traced(span, async move {
            validate_request(&request)?;
            validate_route_spec(&request.spec)?;
            let mut registry = self.registry.write().await;
            registry
                .update_route(
                    &request.mesh_name,
                    &request.virtual_router_name,
                    &request.route_name,
                    request.spec,
                )
                .map(|route| UpdateRouteResult { route })
        })
        .await
    }

    async fn delete_route(&self, request: DeleteRouteRequest) -> Result<DeleteRouteResult> {
        let span = crate::operation_span!(
            "DeleteRoute",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name,
            route_name = %request.route_name
        );
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry
                .delete_route(&request.mesh_name, &request.virtual_router_name, &request.route_name)
                .map(|route| DeleteRouteResult { route })
        })
        .await
    }

    async fn list_routes(&self, request: ListRoutesRequest) -> Result<ListRoutesResult> {
        let span = crate::operation_span!(
            "ListRoutes",
            mesh_name = %request.mesh_name,
            virtual_router_name = %request.virtual_router_name
        );
        let limit = self.config.page_limit(request.limit);
        traced(span, async move {
            validate_request(&request)?;
            let routes = self
                .registry
                .read()
                .await
                .list_routes(&request.mesh_name, &request.virtual_router_name)?;
            let page = Page::paginate(
                routes,
                |route| route.route_name.as_str(),
                limit,
                request.next_token.as_deref(),
            )?;
            debug!(count = page.items.len(), "Routes listed");
            Ok::<_, AppMeshError>(ListRoutesResult { next_token: page.next_token, routes: page.items })
        })
        .await
    }

    async fn list_tags_for_resource(
        &self,
        request: ListTagsForResourceRequest,
    ) -> Result<ListTagsForResourceResult> {
        let span =
            crate::operation_span!("ListTagsForResource", resource_arn = %request.resource_arn);
        let limit = self.config.page_limit(request.limit).min(MAX_TAG_LIST_LIMIT as usize);
        traced(span, async move {
            validate_request(&request)?;
            let tags = self.registry.read().await.list_tags(&request.resource_arn)?;
            let page =
                Page::paginate(tags, |tag| tag.key.as_str(), limit, request.next_token.as_deref())?;
            debug!(count = page.items.len(), "Tags listed");
            Ok::<_, AppMeshError>(ListTagsForResourceResult {
                next_token: page.next_token,
                tags: page.items,
            })
        })
        .await
    }

    async fn tag_resource(&self, request: TagResourceRequest) -> Result<TagResourceResult> {
        let span = crate::operation_span!("TagResource", resource_arn = %request.resource_arn);
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry
                .tag_resource(&request.resource_arn, request.tags)
                .map(|_| TagResourceResult::default())
        })
        .await
    }

    async fn untag_resource(&self, request: UntagResourceRequest) -> Result<UntagResourceResult> {
        let span = crate::operation_span!("UntagResource", resource_arn = %request.resource_arn);
        traced(span, async move {
            validate_request(&request)?;
            let mut registry = self.registry.write().await;
            registry
                .untag_resource(&request.resource_arn, &request.tag_keys)
                .map(|_| UntagResourceResult::default())
        })
        .await
    }
}
