//! Client configuration from environment.

use gcs_core::DEFAULT_ALTITUDE_M;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GcsConfig {
    /// Base URL of the backend REST API
    pub api_url: String,
    /// Path of the backend WebSocket endpoint
    pub ws_path: String,
    /// How long to wait for a `send_route` acknowledgement
    pub ack_timeout: Duration,
    /// Altitude attached to exported mission points
    pub default_altitude_m: f64,
}

impl Default for GcsConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            ws_path: "/ws".to_string(),
            ack_timeout: Duration::from_secs(5),
            default_altitude_m: DEFAULT_ALTITUDE_M,
        }
    }
}

impl GcsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("GCS_API_URL").unwrap_or(defaults.api_url),
            ws_path: env::var("GCS_WS_PATH").unwrap_or(defaults.ws_path),
            ack_timeout: env::var("GCS_ACK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.ack_timeout),
            default_altitude_m: env::var("GCS_DEFAULT_ALT_M")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_altitude_m),
        }
    }

    /// WebSocket URL derived from the API URL and `ws_path`.
    pub fn ws_url(&self) -> anyhow::Result<String> {
        Ok(crate::channel::http_to_ws_url(&self.api_url, &self.ws_path)?.to_string())
    }
}
