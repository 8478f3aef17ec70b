//! Virtual service resource types
//!
//! A virtual service is the stable name clients address. It is backed by
//! exactly one provider: a virtual node or a virtual router.

use serde::{Deserialize, Serialize};

use super::common::ResourceMetadata;
use super::enums::VirtualServiceStatusCode;
use super::render::impl_render_display;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNodeServiceProvider {
    pub virtual_node_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRouterServiceProvider {
    pub virtual_router_name: String,
}

/// The resource answering for a virtual service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VirtualServiceProvider {
    VirtualNode(VirtualNodeServiceProvider),
    VirtualRouter(VirtualRouterServiceProvider),
}

impl VirtualServiceProvider {
    pub fn virtual_node(name: impl Into<String>) -> Self {
        Self::VirtualNode(VirtualNodeServiceProvider { virtual_node_name: name.into() })
    }

    pub fn virtual_router(name: impl Into<String>) -> Self {
        Self::VirtualRouter(VirtualRouterServiceProvider { virtual_router_name: name.into() })
    }

    pub fn virtual_node_name(&self) -> Option<&str> {
        match self {
            Self::VirtualNode(provider) => Some(&provider.virtual_node_name),
            Self::VirtualRouter(_) => None,
        }
    }

    pub fn virtual_router_name(&self) -> Option<&str> {
        match self {
            Self::VirtualRouter(provider) => Some(&provider.virtual_router_name),
            Self::VirtualNode(_) => None,
        }
    }
}

/// Configuration of a virtual service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<VirtualServiceProvider>,
}

impl VirtualServiceSpec {
    pub fn with_provider(mut self, provider: VirtualServiceProvider) -> Self {
        self.provider = Some(provider);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VirtualServiceStatusCode>,
}

impl VirtualServiceStatus {
    pub fn new(status: VirtualServiceStatusCode) -> Self {
        Self { status: Some(status) }
    }
}

/// A virtual service as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceData {
    pub mesh_name: String,

    pub metadata: ResourceMetadata,

    pub spec: VirtualServiceSpec,

    pub status: VirtualServiceStatus,

    pub virtual_service_name: String,
}

impl VirtualServiceData {
    pub fn to_ref(&self) -> VirtualServiceRef {
        VirtualServiceRef {
            arn: self.metadata.arn.clone(),
            mesh_name: self.mesh_name.clone(),
            virtual_service_name: self.virtual_service_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServiceRef {
    pub arn: String,

    pub mesh_name: String,

    pub virtual_service_name: String,
}

impl_render_display!(
    VirtualNodeServiceProvider,
    VirtualRouterServiceProvider,
    VirtualServiceProvider,
    VirtualServiceSpec,
    VirtualServiceStatus,
    VirtualServiceData,
    VirtualServiceRef,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_wire_shape() {
        let spec = VirtualServiceSpec::default()
            .with_provider(VirtualServiceProvider::virtual_router("orders-router"));
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"provider": {"virtualRouter": {"virtualRouterName": "orders-router"}}})
        );
    }

    #[test]
    fn provider_with_both_branches_is_rejected() {
        let doc = json!({
            "provider": {
                "virtualNode": {"virtualNodeName": "orders-v1"},
                "virtualRouter": {"virtualRouterName": "orders-router"}
            }
        });
        assert!(serde_json::from_value::<VirtualServiceSpec>(doc).is_err());
    }

    #[test]
    fn provider_accessors() {
        let provider = VirtualServiceProvider::virtual_node("orders-v1");
        assert_eq!(provider.virtual_node_name(), Some("orders-v1"));
        assert_eq!(provider.virtual_router_name(), None);
    }

    #[test]
    fn absent_provider_is_allowed() {
        let spec: VirtualServiceSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.provider.is_none());
        assert_eq!(spec.to_string(), "{}");
    }
}
