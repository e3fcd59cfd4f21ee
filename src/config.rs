//! Process configuration loaded from the environment

use std::env;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use crate::detection::{ClassifierParams, DEFAULT_EPSILON, DEFAULT_THRESHOLD};
use crate::models::ChannelOrder;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings for the service, read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// THRESHOLD_BINARY
    pub threshold_binary: u8,
    /// APPROX_POLY_DP_EPSILON
    pub approx_poly_dp_epsilon: f64,
    /// CHANNEL_ORDER
    pub channel_order: ChannelOrder,
    /// FASTAPI_HOST
    pub host: String,
    /// FASTAPI_PORT
    pub port: u16,
    /// FASTAPI_LOG_LEVEL
    pub log_level: LevelFilter,
    /// MAX_BODY_BYTES
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold_binary: DEFAULT_THRESHOLD,
            approx_poly_dp_epsilon: DEFAULT_EPSILON,
            channel_order: ChannelOrder::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: LevelFilter::INFO,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Settings {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let approx_poly_dp_epsilon: f64 = parse_var(
            &lookup,
            "APPROX_POLY_DP_EPSILON",
            defaults.approx_poly_dp_epsilon,
            "a positive finite number",
        )?;
        if !(approx_poly_dp_epsilon.is_finite() && approx_poly_dp_epsilon > 0.0) {
            return Err(ConfigError::Invalid {
                key: "APPROX_POLY_DP_EPSILON",
                value: approx_poly_dp_epsilon.to_string(),
                expected: "a positive finite number",
            });
        }

        let log_level = match lookup("FASTAPI_LOG_LEVEL") {
            Some(raw) => parse_log_level(&raw).ok_or(ConfigError::Invalid {
                key: "FASTAPI_LOG_LEVEL",
                value: raw,
                expected: "one of critical, error, warning, info, debug, trace",
            })?,
            None => defaults.log_level,
        };

        Ok(Self {
            threshold_binary: parse_var(
                &lookup,
                "THRESHOLD_BINARY",
                defaults.threshold_binary,
                "an integer in 0..=255",
            )?,
            approx_poly_dp_epsilon,
            channel_order: parse_var(
                &lookup,
                "CHANNEL_ORDER",
                defaults.channel_order,
                "bgr or rgb",
            )?,
            host: lookup("FASTAPI_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "FASTAPI_PORT", defaults.port, "a port number")?,
            log_level,
            max_body_bytes: parse_var(
                &lookup,
                "MAX_BODY_BYTES",
                defaults.max_body_bytes,
                "a byte count",
            )?,
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn classifier_params(&self) -> ClassifierParams {
        ClassifierParams {
            threshold: self.threshold_binary,
            epsilon: self.approx_poly_dp_epsilon,
            channel_order: self.channel_order,
        }
    }
}

fn parse_var<T, F>(
    lookup: &F,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
            expected,
        }),
        None => Ok(default),
    }
}

/// Accepts the uvicorn level names plus `warn` and `trace`
fn parse_log_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "critical" | "error" => Some(LevelFilter::ERROR),
        "warning" | "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
