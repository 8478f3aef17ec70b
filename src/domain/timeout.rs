//! Per-protocol timeout settings shared by listeners and routes.

use serde::{Deserialize, Serialize};

use super::common::Duration;
use super::render::impl_render_display;

/// Timeouts for HTTP and HTTP/2 traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpTimeout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_request: Option<Duration>,
}

impl HttpTimeout {
    pub fn with_idle(mut self, idle: Duration) -> Self {
        self.idle = Some(idle);
        self
    }

    pub fn with_per_request(mut self, per_request: Duration) -> Self {
        self.per_request = Some(per_request);
        self
    }
}

/// Timeouts for gRPC traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcTimeout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_request: Option<Duration>,
}

impl GrpcTimeout {
    pub fn with_idle(mut self, idle: Duration) -> Self {
        self.idle = Some(idle);
        self
    }

    pub fn with_per_request(mut self, per_request: Duration) -> Self {
        self.per_request = Some(per_request);
        self
    }
}

/// Timeouts for TCP traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpTimeout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle: Option<Duration>,
}

impl TcpTimeout {
    pub fn with_idle(mut self, idle: Duration) -> Self {
        self.idle = Some(idle);
        self
    }
}

/// Listener timeout, keyed by the protocol of the listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListenerTimeout {
    Grpc(GrpcTimeout),
    Http(HttpTimeout),
    Http2(HttpTimeout),
    Tcp(TcpTimeout),
}

impl ListenerTimeout {
    /// Every duration set on this timeout.
    pub fn durations(&self) -> Vec<&Duration> {
        match self {
            ListenerTimeout::Grpc(t) => t.idle.iter().chain(t.per_request.iter()).collect(),
            ListenerTimeout::Http(t) | ListenerTimeout::Http2(t) => {
                t.idle.iter().chain(t.per_request.iter()).collect()
            }
            ListenerTimeout::Tcp(t) => t.idle.iter().collect(),
        }
    }
}

impl_render_display!(HttpTimeout, GrpcTimeout, TcpTimeout, ListenerTimeout);
