//! Operation surface
//!
//! [`AppMesh`] is the seam between callers and a mesh backend: one async
//! method per operation, each taking its request envelope and returning
//! its result envelope. [`InMemoryAppMesh`] is the process-local backend
//! used for tests and local development.

pub mod arn;
pub mod memory;

use async_trait::async_trait;

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
    ListVirtualServicesRequest, ListVirtualServicesResult, TagResourceRequest, TagResourceResult,
    UntagResourceRequest, UntagResourceResult, UpdateMeshRequest, UpdateMeshResult,
    UpdateRouteRequest, UpdateRouteResult, UpdateVirtualNodeRequest, UpdateVirtualNodeResult,
    UpdateVirtualRouterRequest, UpdateVirtualRouterResult, UpdateVirtualServiceRequest,
    UpdateVirtualServiceResult,
};
use crate::errors::Result;

pub use arn::ArnBuilder;
pub use memory::InMemoryAppMesh;

/// Trait for a service mesh configuration backend
#[async_trait]
pub trait AppMesh: Send + Sync {
    async fn create_mesh(&self, request: CreateMeshRequest) -> Result<CreateMeshResult>;

    async fn describe_mesh(&self, request: DescribeMeshRequest) -> Result<DescribeMeshResult>;

    async fn update_mesh(&self, request: UpdateMeshRequest) -> Result<UpdateMeshResult>;

    /// Fails with `ResourceInUse` while the mesh still contains resources
    async fn delete_mesh(&self, request: DeleteMeshRequest) -> Result<DeleteMeshResult>;

    async fn list_meshes(&self, request: ListMeshesRequest) -> Result<ListMeshesResult>;

    async fn create_virtual_node(
        &self,
        request: CreateVirtualNodeRequest,
    ) -> Result<CreateVirtualNodeResult>;

    async fn describe_virtual_node(
        &self,
        request: DescribeVirtualNodeRequest,
    ) -> Result<DescribeVirtualNodeResult>;

    async fn update_virtual_node(
        &self,
        request: UpdateVirtualNodeRequest,
    ) -> Result<UpdateVirtualNodeResult>;

    async fn delete_virtual_node(
        &self,
        request: DeleteVirtualNodeRequest,
    ) -> Result<DeleteVirtualNodeResult>;

    async fn list_virtual_nodes(
        &self,
        request: ListVirtualNodesRequest,
    ) -> Result<ListVirtualNodesResult>;

    async fn create_virtual_router(
        &self,
        request: CreateVirtualRouterRequest,
    ) -> Result<CreateVirtualRouterResult>;

    async fn describe_virtual_router(
        &self,
        request: DescribeVirtualRouterRequest,
    ) -> Result<DescribeVirtualRouterResult>;

    async fn update_virtual_router(
        &self,
        request: UpdateVirtualRouterRequest,
    ) -> Result<UpdateVirtualRouterResult>;

    async fn delete_virtual_router(
        &self,
        request: DeleteVirtualRouterRequest,
    ) -> Result<DeleteVirtualRouterResult>;

    async fn list_virtual_routers(
        &self,
        request: ListVirtualRoutersRequest,
    ) -> Result<ListVirtualRoutersResult>;

    async fn create_virtual_service(
        &self,
        request: CreateVirtualServiceRequest,
    ) -> Result<CreateVirtualServiceResult>;

    async fn describe_virtual_service(
        &self,
        request: DescribeVirtualServiceRequest,
    ) -> Result<DescribeVirtualServiceResult>;

    async fn update_virtual_service(
        &self,
        request: UpdateVirtualServiceRequest,
    ) -> Result<UpdateVirtualServiceResult>;

    async fn delete_virtual_service(
        &self,
        request: DeleteVirtualServiceRequest,
    ) -> Result<DeleteVirtualServiceResult>;

    async fn list_virtual_services(
        &self,
        request: ListVirtualServicesRequest,
    ) -> Result<ListVirtualServicesResult>;

    async fn create_route(&self, request: CreateRouteRequest) -> Result<CreateRouteResult>;

    async fn describe_route(&self, request: DescribeRouteRequest) -> Result<DescribeRouteResult>;

    async fn update_route(&self, request: UpdateRouteRequest) -> Result<UpdateRouteResult>;

    async fn delete_route(&self, request: DeleteRouteRequest) -> Result<DeleteRouteResult>;

    async fn list_routes(&self, request: ListRoutesRequest) -> Result<ListRoutesResult>;

    async fn list_tags_for_resource(
        &self,
        request: ListTagsForResourceRequest,
    ) -> Result<ListTagsForResourceResult>;

    async fn tag_resource(&self, request: TagResourceRequest) -> Result<TagResourceResult>;

    /// Keys that are not present are ignored
    async fn untag_resource(&self, request: UntagResourceRequest) -> Result<UntagResourceResult>;
}
