//! Hub configuration: compiled-in defaults with environment overrides

use crate::core::reconnect::ReconnectPolicy;
use std::time::Duration;
use tracing::warn;

/// Default engine ASP endpoint (override with NOETIC_WS env var)
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws/asp";
/// Client identifier sent in the handshake
pub const DEFAULT_CLIENT_ID: &str = "web-hub";
/// Protocol version literal sent in the handshake
pub const PROTOCOL_VERSION: &str = "1.0";

pub const ENV_WS_URL: &str = "NOETIC_WS";
pub const ENV_CLIENT_ID: &str = "NOETIC_CLIENT_ID";
pub const ENV_RECONNECT_MS: &str = "NOETIC_RECONNECT_MS";

/// Smallest accepted reconnect interval; lower values would spin the retry loop
pub const MIN_RECONNECT_MS: u64 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HubConfig {
    pub ws_url: String,
    pub client_id: String,
    pub protocol_version: String,
    pub reconnect: ReconnectPolicy,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            protocol_version: PROTOCOL_VERSION.to_string(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl HubConfig {
    /// Build a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_WS_URL).filter(|v| !v.trim().is_empty()) {
            config.ws_url = url.trim().to_string();
        }
        if let Some(id) = lookup(ENV_CLIENT_ID).filter(|v| !v.trim().is_empty()) {
            config.client_id = id.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_RECONNECT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms >= MIN_RECONNECT_MS => {
                    config.reconnect = ReconnectPolicy::Fixed {
                        interval: Duration::from_millis(ms),
                        max_attempts: None,
                    }
                }
                Ok(ms) => warn!(
                    value = ms,
                    min = MIN_RECONNECT_MS,
                    "Ignoring {} below minimum",
                    ENV_RECONNECT_MS
                ),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid {}", ENV_RECONNECT_MS),
            }
        }

        config
    }

    /// Read overrides from the process environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Browser build: the page may set `window.__noetic_ws_url`
    #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
    pub fn from_window() -> Self {
        let url = js_sys::eval("window.__noetic_ws_url")
            .ok()
            .and_then(|v| v.as_string());
        Self::from_lookup(|key| if key == ENV_WS_URL { url.clone() } else { None })
    }
}
