//! Property tests for closed wire enumerations
//!
//! Lookup must be exact: every wire string maps back to its constant, and
//! nothing outside the closed set (including case variants) is accepted.

use appmesh_model::{
    DurationUnit, EgressFilterType, GrpcRetryPolicyEvent, HttpMethod, HttpScheme,
    InvalidEnumValue, ListenerTlsMode, MeshStatusCode, PortProtocol, RouteStatusCode,
    TcpRetryPolicyEvent, VirtualNodeStatusCode, VirtualRouterStatusCode, VirtualServiceStatusCode,
};
use proptest::prelude::*;

macro_rules! assert_closed_set {
    ($($enum_type:ty),+ $(,)?) => {
        $(
            for constant in <$enum_type>::ALL {
                let parsed: $enum_type = constant.as_str().parse().unwrap();
                assert_eq!(&parsed, constant);
                assert_eq!(constant.to_string(), constant.as_str());

                let json = serde_json::to_string(constant).unwrap();
                let decoded: $enum_type = serde_json::from_str(&json).unwrap();
                assert_eq!(&decoded, constant);
            }
            assert!("".parse::<$enum_type>().is_err());
            assert!(<$enum_type>::from_optional(None).is_err());
            assert!(<$enum_type>::from_optional(Some("")).is_err());

            let err = "not-a-real-value".parse::<$enum_type>().unwrap_err();
            assert_eq!(err.value, "not-a-real-value");
            assert!(serde_json::from_str::<$enum_type>("\"not-a-real-value\"").is_err());
        )+
    };
}

#[test]
fn test_every_constant_round_trips_through_its_wire_string() {
    assert_closed_set!(
        DurationUnit,
        EgressFilterType,
        GrpcRetryPolicyEvent,
        HttpMethod,
        HttpScheme,
        ListenerTlsMode,
        MeshStatusCode,
        PortProtocol,
        RouteStatusCode,
        TcpRetryPolicyEvent,
        VirtualNodeStatusCode,
        VirtualRouterStatusCode,
        VirtualServiceStatusCode,
    );
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
    assert!("get".parse::<HttpMethod>().is_err());
    assert!("HTTP".parse::<PortProtocol>().is_err());
    assert!("strict".parse::<ListenerTlsMode>().is_err());
}

#[test]
fn test_unknown_value_error_names_the_type() {
    let err = "websocket".parse::<PortProtocol>().unwrap_err();
    assert_eq!(err, InvalidEnumValue::new("PortProtocol", "websocket"));

    let err = serde_json::from_str::<HttpScheme>("\"ftp\"").unwrap_err();
    assert!(err.to_string().contains("ftp"));
}

proptest! {
    #[test]
    fn prop_http_method_lookup_is_exact(input in "[A-Za-z-]{0,12}") {
        let known = HttpMethod::ALL.iter().find(|method| method.as_str() == input);
        match input.parse::<HttpMethod>() {
            Ok(method) => prop_assert_eq!(Some(&method), known),
            Err(err) => {
                prop_assert!(known.is_none());
                prop_assert_eq!(err.value, input);
            }
        }
    }

    #[test]
    fn prop_grpc_retry_event_lookup_is_exact(input in "[a-z-]{0,20}") {
        let known = GrpcRetryPolicyEvent::ALL.iter().any(|event| event.as_str() == input);
        prop_assert_eq!(input.parse::<GrpcRetryPolicyEvent>().is_ok(), known);
    }
}
