//! Virtual router request/result envelopes

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_resource_name, validate_tags};
use crate::domain::render::impl_render_display;
use crate::domain::{TagRef, VirtualRouterData, VirtualRouterRef, VirtualRouterSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVirtualRouterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    pub spec: VirtualRouterSpec,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(length(max = 50), custom(function = "validate_tags"))]
    pub tags: Vec<TagRef>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl CreateVirtualRouterRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_router_name: impl Into<String>,
        spec: VirtualRouterSpec,
    ) -> Self {
        Self {
            client_token: None,
            mesh_name: mesh_name.into(),
            spec,
            tags: Vec::new(),
            virtual_router_name: virtual_router_name.into(),
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
pub struct CreateVirtualRouterResult {
    pub virtual_router: VirtualRouterData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVirtualRouterRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl DescribeVirtualRouterRequest {
    pub fn new(mesh_name: impl Into<String>, virtual_router_name: impl Into<String>) -> Self {
        Self { mesh_name: mesh_name.into(), virtual_router_name: virtual_router_name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVirtualRouterResult {
    pub virtual_router: VirtualRouterData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVirtualRouterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    pub spec: VirtualRouterSpec,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl UpdateVirtualRouterRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_router_name: impl Into<String>,
        spec: VirtualRouterSpec,
    ) -> Self {
        Self {
            client_token: None,
            mesh_name: mesh_name.into(),
            spec,
            virtual_router_name: virtual_router_name.into(),
        }
    }

    pub fn with_client_token(mut self, client_token: impl Into<String>) -> Self {
        self.client_token = Some(client_token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVirtualRouterResult {
    pub virtual_router: VirtualRouterData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVirtualRouterRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl DeleteVirtualRouterRequest {
    pub fn new(mesh_name: impl Into<String>, virtual_router_name: impl Into<String>) -> Self {
        Self { mesh_name: mesh_name.into(), virtual_router_name: virtual_router_name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVirtualRouterResult {
    pub virtual_router: VirtualRouterData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListVirtualRoutersRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i32>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListVirtualRoutersRequest {
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
pub struct ListVirtualRoutersResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    pub virtual_routers: Vec<VirtualRouterRef>,
}

impl_render_display!(
    CreateVirtualRouterRequest,
    CreateVirtualRouterResult,
    DescribeVirtualRouterRequest,
    DescribeVirtualRouterResult,
    UpdateVirtualRouterRequest,
    UpdateVirtualRouterResult,
    DeleteVirtualRouterRequest,
    DeleteVirtualRouterResult,
    ListVirtualRoutersRequest,
    ListVirtualRoutersResult,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PortMapping, PortProtocol};
    use serde_json::json;

    #[test]
    fn update_request_wire_shape() {
        let request = UpdateVirtualRouterRequest::new(
            "shop",
            "orders-router",
            VirtualRouterSpec::default().with_listener(PortMapping::new(9090, PortProtocol::Grpc)),
        )
        .with_client_token("token-1");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "clientToken": "token-1",
                "meshName": "shop",
                "spec": {"listeners": [{"portMapping": {"port": 9090, "protocol": "grpc"}}]},
                "virtualRouterName": "orders-router"
            })
        );
    }

    #[test]
    fn list_request_rejects_zero_limit() {
        assert!(ListVirtualRoutersRequest::new("shop").with_limit(0).validate().is_err());
        assert!(ListVirtualRoutersRequest::new("shop").with_limit(1).validate().is_ok());
    }
}
