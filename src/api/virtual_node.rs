//! Virtual node request/result envelopes

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_resource_name, validate_tags};
use crate::domain::render::impl_render_display;
use crate::domain::{TagRef, VirtualNodeData, VirtualNodeRef, VirtualNodeSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVirtualNodeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    pub spec: VirtualNodeSpec,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(length(max = 50), custom(function = "validate_tags"))]
    pub tags: Vec<TagRef>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_node_name: String,
}

impl CreateVirtualNodeRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_node_name: impl Into<String>,
        spec: VirtualNodeSpec,
    ) -> Self {
        Self {
            client_token: None,
            mesh_name: mesh_name.into(),
            spec,
            tags: Vec::new(),
            virtual_node_name: virtual_node_name.into(),
        }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }

    pub fn with_tag(mut self, tag: TagRef) -> Self {
        self.tags.push(tag);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVirtualNodeResult {
    pub virtual_node: VirtualNodeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVirtualNodeRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_node_name: String,
}

impl DescribeVirtualNodeRequest {
    pub fn new(mesh_name: impl Into<String>, virtual_node_name: impl Into<String>) -> Self {
        Self { mesh_name: mesh_name.into(), virtual_node_name: virtual_node_name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVirtualNodeResult {
    pub virtual_node: VirtualNodeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVirtualNodeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    pub spec: VirtualNodeSpec,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_node_name: String,
}

impl UpdateVirtualNodeRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_node_name: impl Into<String>,
        spec: VirtualNodeSpec,
    ) -> Self {
        Self {
            client_token: None,
            mesh_name: mesh_name.into(),
            spec,
            virtual_node_name: virtual_node_name.into(),
        }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVirtualNodeResult {
    pub virtual_node: VirtualNodeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVirtualNodeRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_node_name: String,
}

impl DeleteVirtualNodeRequest {
    pub fn new(mesh_name: impl Into<String>, virtual_node_name: impl Into<String>) -> Self {
        Self { mesh_name: mesh_name.into(), virtual_node_name: virtual_node_name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVirtualNodeResult {
    pub virtual_node: VirtualNodeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListVirtualNodesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i32>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListVirtualNodesRequest {
    pub fn new(mesh_name: impl Into<String>) -> Self {
        Self { limit: None, mesh_name: mesh_name.into(), next_token: None }
    }

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
pub struct ListVirtualNodesResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    pub virtual_nodes: Vec<VirtualNodeRef>,
}

impl_render_display!(
    CreateVirtualNodeRequest,
    CreateVirtualNodeResult,
    DescribeVirtualNodeRequest,
    DescribeVirtualNodeResult,
    UpdateVirtualNodeRequest,
    UpdateVirtualNodeResult,
    DeleteVirtualNodeRequest,
    DeleteVirtualNodeResult,
    ListVirtualNodesRequest,
    ListVirtualNodesResult,
);
