//! Mesh request/result envelopes

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_resource_name, validate_tags};
use crate::domain::render::impl_render_display;
use crate::domain::{MeshData, MeshRef, MeshSpec, TagRef};

/// Request for creating a mesh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeshRequest {
    /// Idempotency token supplied by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<MeshSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(length(max = 50), custom(function = "validate_tags"))]
    pub tags: Vec<TagRef>,
}

impl CreateMeshRequest {
    pub fn new(mesh_name: impl Into<String>) -> Self {
        Self { client_token: None, mesh_name: mesh_name.into(), spec: None, tags: Vec::new() }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }

    pub fn with_spec(mut self, spec: MeshSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    pub fn with_tag(mut self, tag: TagRef) -> Self {
        self.tags.push(tag);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeshResult {
    pub mesh: MeshData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescribeMeshRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,
}

impl DescribeMeshRequest {
    pub fn new(mesh_name: impl Into<String>) -> Self {
        Self { mesh_name: mesh_name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeMeshResult {
    pub mesh: MeshData,
}

/// Request for replacing the spec of a mesh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeshRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<MeshSpec>,
}

impl UpdateMeshRequest {
    pub fn new(mesh_name: impl Into<String>) -> Self {
        Self { client_token: None, mesh_name: mesh_name.into(), spec: None }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }

    pub fn with_spec(mut self, spec: MeshSpec) -> Self {
        self.spec = Some(spec);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeshResult {
    pub mesh: MeshData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMeshRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,
}

impl DeleteMeshRequest {
    pub fn new(mesh_name: impl Into<String>) -> Self {
        Self { mesh_name: mesh_name.into() }
    }
}

/// The deleted mesh, with status `DELETED`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMeshResult {
    pub mesh: MeshData,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListMeshesRequest {
    /// Page size, 1-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListMeshesRequest {
    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeshesResult {
    pub meshes: Vec<MeshRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl_render_display!(
    CreateMeshRequest,
    CreateMeshResult,
    DescribeMeshRequest,
    DescribeMeshResult,
    UpdateMeshRequest,
    UpdateMeshResult,
    DeleteMeshRequest,
    DeleteMeshResult,
    ListMeshesRequest,
    ListMeshesResult,
);
