//! Virtual service request/result envelopes

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_resource_name, validate_tags};
use crate::domain::render::impl_render_display;
use crate::domain::{TagRef, VirtualServiceData, VirtualServiceRef, VirtualServiceSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVirtualServiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    pub spec: VirtualServiceSpec,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(length(max = 50), custom(function = "validate_tags"))]
    pub tags: Vec<TagRef>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_service_name: String,
}

impl CreateVirtualServiceRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_service_name: impl Into<String>,
        spec: VirtualServiceSpec,
    ) -> Self {
        Self {
            client_token: None,
            mesh_name: mesh_name.into(),
            spec,
            tags: Vec::new(),
            virtual_service_name: virtual_service_name.into(),
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
pub struct CreateVirtualServiceResult {
    pub virtual_service: VirtualServiceData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVirtualServiceRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_service_name: String,
}

impl DescribeVirtualServiceRequest {
    pub fn new(mesh_name: impl Into<String>, virtual_service_name: impl Into<String>) -> Self {
        Self { mesh_name: mesh_name.into(), virtual_service_name: virtual_service_name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVirtualServiceResult {
    pub virtual_service: VirtualServiceData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVirtualServiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    pub spec: VirtualServiceSpec,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_service_name: String,
}

impl UpdateVirtualServiceRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_service_name: impl Into<String>,
        spec: VirtualServiceSpec,
    ) -> Self {
        Self {
            client_token: None,
            mesh_name: mesh_name.into(),
            spec,
            virtual_service_name: virtual_service_name.into(),
        }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVirtualServiceResult {
    pub virtual_service: VirtualServiceData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVirtualServiceRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_service_name: String,
}

impl DeleteVirtualServiceRequest {
    pub fn new(mesh_name: impl Into<String>, virtual_service_name: impl Into<String>) -> Self {
        Self { mesh_name: mesh_name.into(), virtual_service_name: virtual_service_name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVirtualServiceResult {
    pub virtual_service: VirtualServiceData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListVirtualServicesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i32>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListVirtualServicesRequest {
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
pub struct ListVirtualServicesResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    pub virtual_services: Vec<VirtualServiceRef>,
}

impl_render_display!(
    CreateVirtualServiceRequest,
    CreateVirtualServiceResult,
    DescribeVirtualServiceRequest,
    DescribeVirtualServiceResult,
    UpdateVirtualServiceRequest,
    UpdateVirtualServiceResult,
    DeleteVirtualServiceRequest,
    DeleteVirtualServiceResult,
    ListVirtualServicesRequest,
    ListVirtualServicesResult,
);
