//! Tests for configuration validation

use std::collections::HashMap;

use call_dispatch::config::{CallCenterConfig, ServiceTimeConfig};
use call_dispatch::core::DispatchError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config_is_valid() {
    let config = CallCenterConfig::default();
    assert_eq!(config.agent_capacity, 2);
    assert_eq!(
        config.service_time,
        ServiceTimeConfig::NameHash {
            base_millis: 8_000,
            spread: 8
        }
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_capacity_invalid() {
    let invalid = CallCenterConfig {
        agent_capacity: 0,
        service_time: ServiceTimeConfig::Fixed { millis: 10 },
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_inverted_uniform_range_invalid() {
    let invalid = CallCenterConfig {
        agent_capacity: 1,
        service_time: ServiceTimeConfig::Uniform {
            min_millis: 50,
            max_millis: 10,
        },
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "agent_capacity": 3,
        "service_time": { "kind": "uniform", "min_millis": 10, "max_millis": 40 }
    }"#;

    let config = CallCenterConfig::from_json_str(json).unwrap();
    assert_eq!(config.agent_capacity, 3);
    assert_eq!(
        config.service_time,
        ServiceTimeConfig::Uniform {
            min_millis: 10,
            max_millis: 40
        }
    );
}

#[test]
fn test_config_from_json_defaults_service_time() {
    let config = CallCenterConfig::from_json_str(r#"{ "agent_capacity": 5 }"#).unwrap();
    assert_eq!(config.service_time, ServiceTimeConfig::default());
}

#[test]
fn test_config_from_json_errors() {
    assert!(matches!(
        CallCenterConfig::from_json_str("{ not json"),
        Err(DispatchError::Config(_))
    ));
    assert!(matches!(
        CallCenterConfig::from_json_str(r#"{ "agent_capacity": 0 }"#),
        Err(DispatchError::Validation(_))
    ));
}

#[test]
fn test_config_from_lookup() {
    let config = CallCenterConfig::from_lookup(lookup_from(&[
        ("CALL_CENTER_AGENT_CAPACITY", "4"),
        ("CALL_CENTER_SERVICE_MS", " 25 "),
    ]))
    .unwrap();
    assert_eq!(config.agent_capacity, 4);
    assert_eq!(config.service_time, ServiceTimeConfig::Fixed { millis: 25 });

    let config = CallCenterConfig::from_lookup(lookup_from(&[
        ("CALL_CENTER_SERVICE_MS", "5"),
        ("CALL_CENTER_SERVICE_MAX_MS", "15"),
    ]))
    .unwrap();
    assert_eq!(config.agent_capacity, 2);
    assert_eq!(
        config.service_time,
        ServiceTimeConfig::Uniform {
            min_millis: 5,
            max_millis: 15
        }
    );
}

#[test]
fn test_config_from_lookup_rejects_garbage() {
    let result = CallCenterConfig::from_lookup(lookup_from(&[(
        "CALL_CENTER_AGENT_CAPACITY",
        "many",
    )]));
    assert!(matches!(result, Err(DispatchError::Config(_))));

    let result =
        CallCenterConfig::from_lookup(lookup_from(&[("CALL_CENTER_AGENT_CAPACITY", "0")]));
    assert!(matches!(result, Err(DispatchError::Validation(_))));
}
