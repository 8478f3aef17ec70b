//! Virtual router resource types

use serde::{Deserialize, Serialize};

use super::common::{PortMapping, ResourceMetadata};
use super::enums::VirtualRouterStatusCode;
use super::render::impl_render_display;

/// Port on which a virtual router accepts traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRouterListener {
    pub port_mapping: PortMapping,
}

impl VirtualRouterListener {
    pub fn new(port_mapping: PortMapping) -> Self {
        Self { port_mapping }
    }
}

/// Configuration of a virtual router.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRouterSpec {
    /// At most one listener
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listeners: Vec<VirtualRouterListener>,
}

impl VirtualRouterSpec {
    pub fn with_listener(mut self, port_mapping: PortMapping) -> Self {
        self.listeners.push(VirtualRouterListener::new(port_mapping));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRouterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VirtualRouterStatusCode>,
}

impl VirtualRouterStatus {
    pub fn new(status: VirtualRouterStatusCode) -> Self {
        Self { status: Some(status) }
    }
}

/// A virtual router as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRouterData {
    pub mesh_name: String,

    pub metadata: ResourceMetadata,

    pub spec: VirtualRouterSpec,

    pub status: VirtualRouterStatus,

    pub virtual_router_name: String,
}

impl VirtualRouterData {
    pub fn to_ref(&self) -> VirtualRouterRef {
        VirtualRouterRef {
            arn: self.metadata.arn.clone(),
            mesh_name: self.mesh_name.clone(),
            virtual_router_name: self.virtual_router_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRouterRef {
    pub arn: String,

    pub mesh_name: String,

    pub virtual_router_name: String,
}

impl_render_display!(
    VirtualRouterListener,
    VirtualRouterSpec,
    VirtualRouterStatus,
    VirtualRouterData,
    VirtualRouterRef,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::PortProtocol;
    use serde_json::json;

    #[test]
    fn spec_wire_shape() {
        let spec = VirtualRouterSpec::default().with_listener(PortMapping::new(8080, PortProtocol::Http2));
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"listeners": [{"portMapping": {"port": 8080, "protocol": "http2"}}]})
        );
    }

    #[test]
    fn empty_spec_is_an_empty_object() {
        assert_eq!(serde_json::to_value(VirtualRouterSpec::default()).unwrap(), json!({}));
        let parsed: VirtualRouterSpec = serde_json::from_str("{}").unwrap();
        assert!(parsed.listeners.is_empty());
    }

    #[test]
    fn status_display() {
        let status = VirtualRouterStatus::new(VirtualRouterStatusCode::Inactive);
        assert_eq!(status.to_string(), "{status: INACTIVE}");
        assert_eq!(VirtualRouterStatus::default().to_string(), "{}");
    }
}
