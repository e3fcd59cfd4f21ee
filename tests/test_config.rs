//! Settings are loaded through an injected lookup so no test touches the real environment.

use std::collections::HashMap;

use shapesense::config::{DEFAULT_HOST, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT};
use shapesense::{ChannelOrder, ConfigError, Settings};
use tracing::level_filters::LevelFilter;

fn load(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() -> anyhow::Result<()> {
    let settings = load(&[])?;
    assert_eq!(settings.threshold_binary, 10);
    assert_eq!(settings.approx_poly_dp_epsilon, 0.03);
    assert_eq!(settings.channel_order, ChannelOrder::Bgr);
    assert_eq!(settings.host, DEFAULT_HOST);
    assert_eq!(settings.port, DEFAULT_PORT);
    assert_eq!(settings.log_level, LevelFilter::INFO);
    assert_eq!(settings.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    assert_eq!(settings.bind_addr(), "0.0.0.0:5000");
    Ok(())
}

#[test]
fn test_overrides() -> anyhow::Result<()> {
    let settings = load(&[
        ("THRESHOLD_BINARY", "127"),
        ("APPROX_POLY_DP_EPSILON", "0.05"),
        ("CHANNEL_ORDER", "RGB"),
        ("FASTAPI_HOST", "127.0.0.1"),
        ("FASTAPI_PORT", "8080"),
        ("FASTAPI_LOG_LEVEL", "warning"),
    ])?;

    let params = settings.classifier_params();
    assert_eq!(params.threshold, 127);
    assert_eq!(params.epsilon, 0.05);
    assert_eq!(params.channel_order, ChannelOrder::Rgb);
    assert_eq!(settings.bind_addr(), "127.0.0.1:8080");
    assert_eq!(settings.log_level, LevelFilter::WARN);
    Ok(())
}

#[test]
fn test_malformed_values_fail() {
    let cases = [
        ("THRESHOLD_BINARY", "256"),
        ("THRESHOLD_BINARY", "-1"),
        ("THRESHOLD_BINARY", "ten"),
        ("THRESHOLD_BINARY", ""),
        ("APPROX_POLY_DP_EPSILON", "0"),
        ("APPROX_POLY_DP_EPSILON", "-0.1"),
        ("APPROX_POLY_DP_EPSILON", "NaN"),
        ("APPROX_POLY_DP_EPSILON", "abc"),
        ("FASTAPI_PORT", "70000"),
        ("FASTAPI_LOG_LEVEL", "loud"),
        ("CHANNEL_ORDER", "gbr"),
        ("MAX_BODY_BYTES", "lots"),
    ];

    for (key, value) in cases {
        let err = load(&[(key, value)]).expect_err(&format!("{}={} should fail", key, value));
        let message = err.to_string();
        assert!(message.contains(key), "error for {} should name it: {}", key, message);
    }
}
