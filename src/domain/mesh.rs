//! Service mesh resource types

use serde::{Deserialize, Serialize};

use super::common::ResourceMetadata;
use super::enums::{EgressFilterType, MeshStatusCode};
use super::render::impl_render_display;

/// Egress policy of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EgressFilter {
    #[serde(rename = "type")]
    pub filter_type: EgressFilterType,
}

impl EgressFilter {
    pub fn new(filter_type: EgressFilterType) -> Self {
        Self { filter_type }
    }
}

/// Configuration of a service mesh.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshSpec {
    /// Absent means the service default (`DROP_ALL`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egress_filter: Option<EgressFilter>,
}

impl MeshSpec {
    pub fn with_egress_filter(mut self, filter_type: EgressFilterType) -> Self {
        self.egress_filter = Some(EgressFilter::new(filter_type));
        self
    }

    /// Effective egress policy once the service default is applied.
    pub fn effective_egress(&self) -> EgressFilterType {
        self.egress_filter.map(|f| f.filter_type).unwrap_or(EgressFilterType::DropAll)
    }
}

/// Current state of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MeshStatusCode>,
}

impl MeshStatus {
    pub fn new(status: MeshStatusCode) -> Self {
        Self { status: Some(status) }
    }
}

/// A service mesh as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshData {
    pub mesh_name: String,

    pub metadata: ResourceMetadata,

    pub spec: MeshSpec,

    pub status: MeshStatus,
}

impl MeshData {
    /// Summary reference for list results.
    pub fn to_ref(&self) -> MeshRef {
        MeshRef { arn: self.metadata.arn.clone(), mesh_name: self.mesh_name.clone() }
    }
}

/// Summary of a mesh in list results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshRef {
    pub arn: String,

    pub mesh_name: String,
}

impl MeshRef {
    pub fn new(arn: impl Into<String>, mesh_name: impl Into<String>) -> Self {
        Self { arn: arn.into(), mesh_name: mesh_name.into() }
    }
}

impl_render_display!(EgressFilter, MeshSpec, MeshStatus, MeshData, MeshRef);
