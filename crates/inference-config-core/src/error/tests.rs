//! Tests for error module.

use super::*;

#[test]
fn test_recoverability() {
    let e = EngineError::Probe(ProbeError::Unavailable("no native module".to_string()));
    assert!(e.is_recoverable());

    let e = EngineError::Params(ParamsError::NotAnObject("array"));
    assert!(e.is_recoverable());

    let e = EngineError::Config(ConfigError::Toml("expected `=`".to_string()));
    assert!(!e.is_recoverable());
}

#[test]
fn test_display_includes_context() {
    let e = EngineError::from(ConfigError::InvalidValue {
        field: "platform",
        message: "unknown platform 'web'".to_string(),
    });
    let msg = e.to_string();
    assert!(msg.starts_with("Configuration error:"));
    assert!(msg.contains("platform"));
    assert!(msg.contains("web"));
}

#[test]
fn test_serde_json_error_converts_to_params_error() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let e: EngineError = ParamsError::from(parse_err).into();
    assert!(matches!(e, EngineError::Params(ParamsError::Malformed(_))));
}

#[test]
fn test_io_error_converts_to_probe_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "devices.json");
    let e: EngineError = ProbeError::from(io).into();
    assert!(e.to_string().contains("devices.json"));
}
