//! Closed wire enumerations
//!
//! Every enumeration here carries a fixed set of constants, a stable wire
//! string per constant and a reverse lookup. Lookup never coerces: absent,
//! empty and unknown strings fail with [`InvalidEnumValue`]. Serde goes
//! through the same lookup, so decoding a document with an unknown value
//! fails the same way.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::InvalidEnumValue;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every constant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire string for this constant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            /// Look up a possibly absent wire string.
            pub fn from_optional(value: Option<&str>) -> Result<Self, InvalidEnumValue> {
                match value {
                    Some(value) => value.parse(),
                    None => Err(InvalidEnumValue::absent(stringify!($name))),
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(InvalidEnumValue::new(stringify!($name), other)),
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = InvalidEnumValue;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                value.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Lifecycle state of a service mesh.
    MeshStatusCode {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Deleted => "DELETED",
    }
}

wire_enum! {
    /// Lifecycle state of a virtual node.
    VirtualNodeStatusCode {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Deleted => "DELETED",
    }
}

wire_enum! {
    /// Lifecycle state of a virtual router.
    VirtualRouterStatusCode {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Deleted => "DELETED",
    }
}

wire_enum! {
    /// Lifecycle state of a virtual service.
    VirtualServiceStatusCode {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Deleted => "DELETED",
    }
}

wire_enum! {
    /// Lifecycle state of a route.
    RouteStatusCode {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Deleted => "DELETED",
    }
}

wire_enum! {
    /// Egress policy for traffic leaving the mesh.
    EgressFilterType {
        /// Any outbound destination is reachable
        AllowAll => "ALLOW_ALL",
        /// Only destinations inside the mesh and AWS APIs are reachable
        DropAll => "DROP_ALL",
    }
}

wire_enum! {
    /// Unit of a [`Duration`](super::Duration).
    DurationUnit {
        Seconds => "s",
        Milliseconds => "ms",
    }
}

wire_enum! {
    /// Transport protocol of a listener or health check.
    PortProtocol {
        Grpc => "grpc",
        Http => "http",
        Http2 => "http2",
        Tcp => "tcp",
    }
}

wire_enum! {
    /// HTTP request method a route can match on.
    HttpMethod {
        Connect => "CONNECT",
        Delete => "DELETE",
        Get => "GET",
        Head => "HEAD",
        Options => "OPTIONS",
        Patch => "PATCH",
        Post => "POST",
        Put => "PUT",
        Trace => "TRACE",
    }
}

wire_enum! {
    /// URL scheme a route can match on.
    HttpScheme {
        Http => "http",
        Https => "https",
    }
}

wire_enum! {
    /// gRPC status conditions that trigger a retry.
    GrpcRetryPolicyEvent {
        Cancelled => "cancelled",
        DeadlineExceeded => "deadline-exceeded",
        Internal => "internal",
        ResourceExhausted => "resource-exhausted",
        Unavailable => "unavailable",
    }
}

wire_enum! {
    /// TCP conditions that trigger a retry.
    TcpRetryPolicyEvent {
        ConnectionError => "connection-error",
    }
}

wire_enum! {
    /// How a listener treats inbound TLS.
    ListenerTlsMode {
        /// Only TLS connections are accepted
        Strict => "STRICT",
        /// Plaintext and TLS connections are both accepted
        Permissive => "PERMISSIVE",
        /// TLS is off
        Disabled => "DISABLED",
    }
}

impl PortProtocol {
    /// Whether the protocol carries HTTP semantics.
    pub fn is_http(&self) -> bool {
        matches!(self, PortProtocol::Http | PortProtocol::Http2 | PortProtocol::Grpc)
    }
}

impl DurationUnit {
    /// Number of milliseconds in one unit.
    pub fn millis_per_unit(&self) -> u64 {
        match self {
            DurationUnit::Seconds => 1_000,
            DurationUnit::Milliseconds => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_protocol_round_trip() {
        for protocol in PortProtocol::ALL {
            assert_eq!(protocol.as_str().parse::<PortProtocol>(), Ok(*protocol));
        }
    }

    #[test]
    fn duration_unit_wire_strings() {
        assert_eq!(DurationUnit::Milliseconds.as_str(), "ms");
        assert_eq!(DurationUnit::Seconds.as_str(), "s");
        assert_eq!(DurationUnit::Seconds.millis_per_unit(), 1_000);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let err = "get".parse::<HttpMethod>().unwrap_err();
        assert_eq!(err.type_name, "HttpMethod");
        assert_eq!(err.value, "get");
        assert!("GET".parse::<HttpMethod>().is_ok());
    }

    #[test]
    fn empty_and_absent_rejected() {
        assert!("".parse::<MeshStatusCode>().is_err());
        assert_eq!(
            MeshStatusCode::from_optional(None),
            Err(InvalidEnumValue::absent("MeshStatusCode"))
        );
        assert_eq!(MeshStatusCode::from_optional(Some("ACTIVE")), Ok(MeshStatusCode::Active));
    }

    #[test]
    fn grpc_events_use_hyphenated_wire_form() {
        assert_eq!(GrpcRetryPolicyEvent::DeadlineExceeded.to_string(), "deadline-exceeded");
        assert_eq!(
            GrpcRetryPolicyEvent::try_from("resource-exhausted"),
            Ok(GrpcRetryPolicyEvent::ResourceExhausted)
        );
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&EgressFilterType::DropAll).unwrap();
        assert_eq!(json, "\"DROP_ALL\"");

        let parsed: ListenerTlsMode = serde_json::from_str("\"PERMISSIVE\"").unwrap();
        assert_eq!(parsed, ListenerTlsMode::Permissive);

        let err = serde_json::from_str::<ListenerTlsMode>("\"LENIENT\"").unwrap_err();
        assert!(err.to_string().contains("invalid ListenerTlsMode value: 'LENIENT'"));
    }

    #[test]
    fn protocol_http_detection() {
        assert!(PortProtocol::Http.is_http());
        assert!(PortProtocol::Http2.is_http());
        assert!(PortProtocol::Grpc.is_http());
        assert!(!PortProtocol::Tcp.is_http());
    }
}
