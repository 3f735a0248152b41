//! Serde round-trip tests for core types.

use crate::{ServiceKind, ServiceUsage, UsageLineItem, UsageReport, aggregate};

#[test]
fn service_kind_roundtrips_all_variants() {
    for kind in ServiceKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        let deserialized: ServiceKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, deserialized, "round-trip failed for {kind:?}");
    }
}

#[test]
fn service_kind_serializes_snake_case() {
    let test_cases = vec![
        (r#""dynamic_map""#, ServiceKind::DynamicMap),
        (r#""static_map""#, ServiceKind::StaticMap),
        (r#""geocoding""#, ServiceKind::Geocoding),
        (r#""reverse_geocoding""#, ServiceKind::ReverseGeocoding),
        (r#""directions5""#, ServiceKind::Directions5),
        (r#""directions15""#, ServiceKind::Directions15),
    ];

    for (json, expected) in test_cases {
        assert_eq!(serde_json::to_string(&expected).unwrap(), json);
        let result: ServiceKind = serde_json::from_str(json).unwrap();
        assert_eq!(result, expected, "failed for {json}");
    }
}

#[test]
fn service_kind_rejects_unknown_names() {
    let result: Result<ServiceKind, _> = serde_json::from_str(r#""walking_directions""#);
    assert!(result.is_err());
}

#[test]
fn usage_report_roundtrips() {
    let report = aggregate(&[UsageLineItem {
        label: "Dynamic Map".to_string(),
        quantity: 4_800_000.0,
        cost: 1000.0,
    }]);

    let json = serde_json::to_string(&report).unwrap();
    let deserialized: UsageReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report, deserialized);
}

#[test]
fn service_usage_roundtrips() {
    let usage = ServiceUsage {
        service: ServiceKind::Directions15,
        usage: 2_900.0,
        free_limit: 3_000,
        rate_percent: 96.7,
        cost: 120.0,
    };
    let json = serde_json::to_string(&usage).unwrap();
    let deserialized: ServiceUsage = serde_json::from_str(&json).unwrap();
    assert_eq!(usage, deserialized);
}
