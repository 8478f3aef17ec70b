//! Leaf value types shared across the mesh model
//!
//! Durations, port mappings, match ranges, weighted targets, tags and
//! resource metadata. Documented numeric and length bounds are not checked
//! here; the service side enforces them (see [`crate::validation`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{DurationUnit, PortProtocol};
use super::render::impl_render_display;

/// An amount of time with an explicit unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duration {
    /// Unit of `value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<DurationUnit>,

    /// Magnitude, at least 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl Duration {
    pub fn new(unit: DurationUnit, value: i64) -> Self {
        Self { unit: Some(unit), value: Some(value) }
    }

    pub fn millis(value: i64) -> Self {
        Self::new(DurationUnit::Milliseconds, value)
    }

    pub fn seconds(value: i64) -> Self {
        Self::new(DurationUnit::Seconds, value)
    }

    pub fn with_unit(mut self, unit: DurationUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Convert to a std duration. `None` unless both parts are set and the
    /// value is non-negative.
    pub fn to_std(&self) -> Option<std::time::Duration> {
        match (self.unit, self.value) {
            (Some(unit), Some(value)) if value >= 0 => {
                let millis = (value as u64).checked_mul(unit.millis_per_unit())?;
                Some(std::time::Duration::from_millis(millis))
            }
            _ => None,
        }
    }
}

/// A port and the protocol spoken on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    /// Port number, documented as 1-65535
    pub port: i32,

    pub protocol: PortProtocol,
}

impl PortMapping {
    pub fn new(port: i32, protocol: PortProtocol) -> Self {
        Self { port, protocol }
    }

    pub fn http(port: i32) -> Self {
        Self::new(port, PortProtocol::Http)
    }

    pub fn with_port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    pub fn with_protocol(mut self, protocol: PortProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Whether `port` is inside 1-65535.
    pub fn has_valid_port(&self) -> bool {
        (1..=65535).contains(&self.port)
    }
}

/// Half-open integer interval: `start` inclusive, `end` exclusive.
///
/// `start = 1, end = 100` matches 1 through 99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRange {
    pub start: i64,
    pub end: i64,
}

impl MatchRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value < self.end
    }

    /// A range whose end does not exceed its start matches nothing.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A traffic-split destination with its relative weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedTarget {
    /// Name of the virtual node receiving the traffic
    pub virtual_node: String,

    /// Weight, documented as 0-100
    pub weight: i32,
}

impl WeightedTarget {
    pub fn new(virtual_node: impl Into<String>, weight: i32) -> Self {
        Self { virtual_node: virtual_node.into(), weight }
    }

    pub fn with_virtual_node(mut self, virtual_node: impl Into<String>) -> Self {
        self.virtual_node = virtual_node.into();
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }
}

/// Sum of the weights of `targets`, widened so it cannot overflow.
pub fn total_weight(targets: &[WeightedTarget]) -> i64 {
    targets.iter().map(|t| i64::from(t.weight)).sum()
}

/// A key/value tag attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    /// 1-128 characters
    pub key: String,

    /// 0-256 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TagRef {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: Some(value.into()) }
    }

    /// A tag with a key and no value.
    pub fn key_only(key: impl Into<String>) -> Self {
        Self { key: key.into(), value: None }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Service-assigned metadata common to every mesh resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    pub arn: String,

    pub created_at: DateTime<Utc>,

    pub last_updated_at: DateTime<Utc>,

    /// Unique identifier assigned at creation
    pub uid: String,

    /// Incremented on every update, starting at 1
    pub version: i64,
}

impl ResourceMetadata {
    pub fn new(arn: impl Into<String>, uid: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self { arn: arn.into(), created_at: at, last_updated_at: at, uid: uid.into(), version: 1 }
    }

    /// Metadata after one more update at `at`.
    pub fn bumped(&self, at: DateTime<Utc>) -> Self {
        Self { last_updated_at: at, version: self.version + 1, ..self.clone() }
    }
}

impl_render_display!(Duration, PortMapping, MatchRange, WeightedTarget, TagRef, ResourceMetadata);
