//! Service Configuration
//!
//! Every knob reads from an environment variable with a development-friendly
//! default, so `mayday-server` starts with no configuration at all and
//! deployments override only what they need.

use std::time::Duration;

use mayday_advice::DEFAULT_GEMINI_MODEL;

// ============================================================================
// GRPC SERVER
// ============================================================================

/// Listen address for the gRPC alert service.
///
/// Environment:
/// - `MAYDAY_GRPC_BIND` (default `0.0.0.0`)
/// - `MAYDAY_GRPC_PORT` (default `9090`)
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub bind: String,
    pub port: u16,
}

impl RpcConfig {
    pub fn from_env() -> Self {
        Self {
            bind: std::env::var("MAYDAY_GRPC_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("MAYDAY_GRPC_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(9090),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 9090,
        }
    }
}

// ============================================================================
// HTTP GATEWAY
// ============================================================================

/// HTTP gateway settings, including the deadlines for the two endpoints that
/// bridge streaming calls into blocking responses.
///
/// Environment:
/// - `MAYDAY_HTTP_BIND` (default `0.0.0.0`)
/// - `MAYDAY_HTTP_PORT` (default `8080`)
/// - `MAYDAY_GRPC_ENDPOINT` (default `http://127.0.0.1:9090`)
/// - `MAYDAY_BATCH_DEADLINE_SECS` (default `10`)
/// - `MAYDAY_CHAT_DEADLINE_SECS` (default `5`)
/// - `MAYDAY_CORS_ORIGINS` comma-separated; empty allows any origin
/// - `MAYDAY_SEED_DEMO` set to `true` to load demo alerts at startup
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind: String,
    pub port: u16,
    pub grpc_endpoint: String,
    pub batch_deadline: Duration,
    pub chat_deadline: Duration,
    pub cors_origins: Vec<String>,
    pub seed_demo: bool,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind: std::env::var("MAYDAY_HTTP_BIND").unwrap_or(defaults.bind),
            port: std::env::var("MAYDAY_HTTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            grpc_endpoint: std::env::var("MAYDAY_GRPC_ENDPOINT").unwrap_or(defaults.grpc_endpoint),
            batch_deadline: std::env::var("MAYDAY_BATCH_DEADLINE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.batch_deadline),
            chat_deadline: std::env::var("MAYDAY_CHAT_DEADLINE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.chat_deadline),
            cors_origins: std::env::var("MAYDAY_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            seed_demo: std::env::var("MAYDAY_SEED_DEMO")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            grpc_endpoint: "http://127.0.0.1:9090".to_string(),
            batch_deadline: Duration::from_secs(10),
            chat_deadline: Duration::from_secs(5),
            cors_origins: Vec::new(),
            seed_demo: false,
        }
    }
}

// ============================================================================
// ADVISORY PROVIDER
// ============================================================================

/// Settings for the upstream advisory model behind the chat endpoint.
///
/// Environment:
/// - `GEMINI_API_KEY` (no default; chat falls back to canned advice when unset)
/// - `MAYDAY_ADVICE_MODEL` (default `gemini-2.0-flash`)
/// - `MAYDAY_ADVICE_TIMEOUT_SECS` (default `4`, kept under the chat deadline)
#[derive(Debug, Clone)]
pub struct AdviceConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl AdviceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: std::env::var("MAYDAY_ADVICE_MODEL").unwrap_or(defaults.model),
            timeout: std::env::var("MAYDAY_ADVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_secs(4),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_defaults() {
        let config = RpcConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:9090");
    }

    #[test]
    fn gateway_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.grpc_endpoint, "http://127.0.0.1:9090");
        assert_eq!(config.batch_deadline, Duration::from_secs(10));
        assert_eq!(config.chat_deadline, Duration::from_secs(5));
        assert!(config.cors_origins.is_empty());
        assert!(!config.seed_demo);
    }

    #[test]
    fn advice_defaults() {
        let config = AdviceConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(4));
    }
}
