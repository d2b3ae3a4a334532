use relaywatch::{ConfigError, LogLevel, ProbeConfig};
use std::time::Duration;

#[test]
fn empty_document_yields_deployment_defaults() {
    let config = ProbeConfig::from_json("{}").unwrap();
    assert_eq!(config, ProbeConfig::default());
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.receiver.port, 22111);
    assert_eq!(config.receiver.teardown(), Duration::from_secs(3 * 60));
    assert_eq!(
        config.receiver.errors.unavailable_period_to_report(),
        Duration::from_secs(60)
    );
}

#[test]
fn partial_documents_override_only_named_fields() {
    let config = ProbeConfig::from_json(
        r#"{"log_level":"debug","receiver":{"errors":{"unavailable_period_to_report_ms":1500}}}"#,
    )
    .unwrap();

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.receiver.port, 22111);
    assert_eq!(config.receiver.teardown_ms, 3 * 60 * 1000);
    assert_eq!(config.receiver.errors.unavailable_period_to_report_ms, 1500);
}

#[test]
fn full_documents_parse_every_field() {
    let config = ProbeConfig::from_json(
        r#"{
            "log_level": "trace",
            "receiver": {
                "port": 9090,
                "teardown_ms": 250,
                "errors": {"unavailable_period_to_report_ms": 1000}
            }
        }"#,
    )
    .unwrap();

    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(config.receiver.port, 9090);
    assert_eq!(config.receiver.teardown(), Duration::from_millis(250));
    assert_eq!(
        config.receiver.errors.unavailable_period_to_report(),
        Duration::from_secs(1)
    );
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = ProbeConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_port_is_rejected() {
    let err = ProbeConfig::from_json(r#"{"receiver":{"port":0}}"#).unwrap_err();
    match err {
        ConfigError::InvalidValue(reason) => assert!(reason.contains("port")),
        other => panic!("expected an invalid-value error, got {other}"),
    }
}

#[test]
fn zero_unavailability_threshold_is_rejected() {
    let err = ProbeConfig::from_json(
        r#"{"receiver":{"errors":{"unavailable_period_to_report_ms":0}}}"#,
    )
    .unwrap_err();
    match err {
        ConfigError::InvalidValue(reason) => {
            assert!(reason.contains("unavailable_period_to_report_ms"))
        }
        other => panic!("expected an invalid-value error, got {other}"),
    }
}

#[test]
fn config_round_trips_through_json() {
    let config = ProbeConfig::from_json(
        r#"{"log_level":"warn","receiver":{"port":8008,"teardown_ms":42}}"#,
    )
    .unwrap();
    let payload = serde_json::to_string(&config).unwrap();
    assert_eq!(ProbeConfig::from_json(&payload).unwrap(), config);
}
