//! Route request/result envelopes

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_resource_name, validate_tags};
use crate::domain::render::impl_render_display;
use crate::domain::{RouteData, RouteRef, RouteSpec, TagRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub route_name: String,

    pub spec: RouteSpec,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(length(max = 50), custom(function = "validate_tags"))]
    pub tags: Vec<TagRef>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl CreateRouteRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_router_name: impl Into<String>,
        route_name: impl Into<String>,
        spec: RouteSpec,
    ) -> Self {
        Self {
            client_token: None,
            mesh_name: mesh_name.into(),
            route_name: route_name.into(),
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
pub struct CreateRouteResult {
    pub route: RouteData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescribeRouteRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub route_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl DescribeRouteRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_router_name: impl Into<String>,
        route_name: impl Into<String>,
    ) -> Self {
        Self {
            mesh_name: mesh_name.into(),
            route_name: route_name.into(),
            virtual_router_name: virtual_router_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeRouteResult {
    pub route: RouteData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub route_name: String,

    pub spec: RouteSpec,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl UpdateRouteRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_router_name: impl Into<String>,
        route_name: impl Into<String>,
        spec: RouteSpec,
    ) -> Self {
        Self {
            client_token: None,
            mesh_name: mesh_name.into(),
            route_name: route_name.into(),
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
pub struct UpdateRouteResult {
    pub route: RouteData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRouteRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub route_name: String,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl DeleteRouteRequest {
    pub fn new(
        mesh_name: impl Into<String>,
        virtual_router_name: impl Into<String>,
        route_name: impl Into<String>,
    ) -> Self {
        Self {
            mesh_name: mesh_name.into(),
            route_name: route_name.into(),
            virtual_router_name: virtual_router_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRouteResult {
    pub route: RouteData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListRoutesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i32>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub mesh_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    #[validate(length(min = 1, max = 255), custom(function = "validate_resource_name"))]
    pub virtual_router_name: String,
}

impl ListRoutesRequest {
    pub fn new(mesh_name: impl Into<String>, virtual_router_name: impl Into<String>) -> Self {
        Self {
            limit: None,
            mesh_name: mesh_name.into(),
            next_token: None,
            virtual_router_name: virtual_router_name.into(),
        }
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
pub struct ListRoutesResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    pub routes: Vec<RouteRef>,
}

impl_render_display!(
    CreateRouteRequest,
    CreateRouteResult,
    DescribeRouteRequest,
    DescribeRouteResult,
    UpdateRouteRequest,
    UpdateRouteResult,
    DeleteRouteRequest,
    DeleteRouteResult,
    ListRoutesRequest,
    ListRoutesResult,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HttpRoute, HttpRouteMatch, WeightedTarget};

    #[test]
    fn create_request_round_trips_route_spec() {
        let spec = RouteSpec::http(HttpRoute::new(
            HttpRouteMatch::prefix("/"),
            vec![WeightedTarget::new("orders-v1", 100)],
        ));
        let request = CreateRouteRequest::new("shop", "orders-router", "default", spec);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""httpRoute""#));
        let parsed: CreateRouteRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn create_request_without_route_flavour_fails_decode() {
        let doc = r#"{
            "meshName": "shop",
            "virtualRouterName": "orders-router",
            "routeName": "default",
            "spec": {"priority": 5}
        }"#;
        assert!(serde_json::from_str::<CreateRouteRequest>(doc).is_err());
    }

    #[test]
    fn list_request_requires_router_name() {
        assert!(ListRoutesRequest::new("shop", "").validate().is_err());
        assert!(ListRoutesRequest::new("shop", "orders-router").validate().is_ok());
    }
}
