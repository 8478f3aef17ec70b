//! Request and result envelopes
//!
//! One request and one result type per operation. Requests derive
//! [`validator::Validate`] for the documented length and range
//! constraints; validation is opt-in and building a request never fails.
//! Deeper spec checks (weights, ports, references) are service-side rules
//! in [`crate::validation`].
//!
//! ```text
//! caller → XRequest → AppMesh::x() → XResult
//! ```

mod mesh;
pub mod pagination;
mod route;
mod tagging;
mod virtual_node;
mod virtual_router;
mod virtual_service;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::domain::TagRef;

pub use mesh::{
    CreateMeshRequest, CreateMeshResult, DeleteMeshRequest, DeleteMeshResult, DescribeMeshRequest,
    DescribeMeshResult, ListMeshesRequest, ListMeshesResult, UpdateMeshRequest, UpdateMeshResult,
};
pub use pagination::{Page, PageToken, MAX_LIST_LIMIT, MAX_TAG_LIST_LIMIT};
pub use route::{
    CreateRouteRequest, CreateRouteResult, DeleteRouteRequest, DeleteRouteResult,
    DescribeRouteRequest, DescribeRouteResult, ListRoutesRequest, ListRoutesResult,
    UpdateRouteRequest, UpdateRouteResult,
};
pub use tagging::{
    ListTagsForResourceRequest, ListTagsForResourceResult, TagResourceRequest, TagResourceResult,
    UntagResourceRequest, UntagResourceResult,
};
pub use virtual_node::{
    CreateVirtualNodeRequest, CreateVirtualNodeResult, DeleteVirtualNodeRequest,
    DeleteVirtualNodeResult, DescribeVirtualNodeRequest, DescribeVirtualNodeResult,
    ListVirtualNodesRequest, ListVirtualNodesResult, UpdateVirtualNodeRequest,
    UpdateVirtualNodeResult,
};
pub use virtual_router::{
    CreateVirtualRouterRequest, CreateVirtualRouterResult, DeleteVirtualRouterRequest,
    DeleteVirtualRouterResult, DescribeVirtualRouterRequest, DescribeVirtualRouterResult,
    ListVirtualRoutersRequest, ListVirtualRoutersResult, UpdateVirtualRouterRequest,
    UpdateVirtualRouterResult,
};
pub use virtual_service::{
    CreateVirtualServiceRequest, CreateVirtualServiceResult, DeleteVirtualServiceRequest,
    DeleteVirtualServiceResult, DescribeVirtualServiceRequest, DescribeVirtualServiceResult,
    ListVirtualServicesRequest, ListVirtualServicesResult, UpdateVirtualServiceRequest,
    UpdateVirtualServiceResult,
};

/// Tags accepted in a single create or tag request.
pub const MAX_TAGS_PER_REQUEST: usize = 50;

lazy_static! {
    /// Resource ARNs issued by the mesh service
    static ref MESH_ARN_REGEX: Regex =
        Regex::new(r"^arn:[a-z0-9-]+:appmesh:[a-z0-9-]*:[0-9]*:mesh/[^/]+(/.+)?$")
            .expect("MESH_ARN_REGEX should be a valid regex pattern");
}

/// Tag keys are 1-128 characters, values at most 256.
fn validate_tags(tags: &Vec<TagRef>) -> Result<(), ValidationError> {
    for tag in tags {
        let key_len = tag.key.chars().count();
        if key_len == 0 || key_len > 128 {
            let mut error = ValidationError::new("tag_key_length");
            error.message = Some("Tag keys must be 1-128 characters".into());
            return Err(error);
        }
        if tag.value.as_deref().is_some_and(|v| v.chars().count() > 256) {
            let mut error = ValidationError::new("tag_value_length");
            error.message = Some("Tag values must be at most 256 characters".into());
            return Err(error);
        }
    }
    Ok(())
}

/// Names form ARN path segments, so they cannot contain `/`.
fn validate_resource_name(name: &str) -> Result<(), ValidationError> {
    if name.contains('/') {
        let mut error = ValidationError::new("invalid_resource_name");
        error.message = Some("Resource names must not contain '/'".into());
        return Err(error);
    }
    Ok(())
}

fn validate_resource_arn(arn: &str) -> Result<(), ValidationError> {
    if !MESH_ARN_REGEX.is_match(arn) {
        let mut error = ValidationError::new("invalid_resource_arn");
        error.message = Some("Resource ARN must identify a mesh resource".into());
        return Err(error);
    }
    Ok(())
}
