//! System configuration parameters
//!
//! Every setting is fixed at build time. String settings may be overridden
//! through `SWITCHLINK_*` environment variables when the firmware is
//! compiled; numeric settings are the constants below.

use crate::adapters::wifi::{validate_password, validate_ssid};
use crate::pins;

/// Which transport carries switch events off the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// One stateless `POST` per event.
    Http,
    /// Publish on a persistent broker session.
    Mqtt,
}

impl TransportKind {
    /// Parse a transport name (`"http"` / `"mqtt"`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("http") {
            Some(Self::Http)
        } else if name.eq_ignore_ascii_case("mqtt") {
            Some(Self::Mqtt)
        } else {
            None
        }
    }
}

/// Errors from [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}

const fn env_or(value: Option<&'static str>, fallback: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => fallback,
    }
}

const fn non_empty(value: &'static str) -> Option<&'static str> {
    if value.is_empty() { None } else { Some(value) }
}

const WIFI_SSID: &str = env_or(option_env!("SWITCHLINK_WIFI_SSID"), "YOUR_WIFI_SSID");
const WIFI_PASSWORD: &str = env_or(option_env!("SWITCHLINK_WIFI_PASSWORD"), "YOUR_WIFI_PASSWORD");
const TRANSPORT: &str = env_or(option_env!("SWITCHLINK_TRANSPORT"), "http");
const HTTP_ENDPOINT: &str = env_or(
    option_env!("SWITCHLINK_HTTP_ENDPOINT"),
    "https://stamya.org/vf/switch/event",
);
const MQTT_HOST: &str = env_or(option_env!("SWITCHLINK_MQTT_HOST"), "broker.local");
const MQTT_CLIENT_ID: &str = env_or(option_env!("SWITCHLINK_MQTT_CLIENT_ID"), "");
const MQTT_USERNAME: &str = env_or(option_env!("SWITCHLINK_MQTT_USERNAME"), "");
const MQTT_PASSWORD: &str = env_or(option_env!("SWITCHLINK_MQTT_PASSWORD"), "");
const ENTERPRISE_ID: &str = env_or(option_env!("SWITCHLINK_ENTERPRISE_ID"), "default");
const DEVICE_ID_OVERRIDE: &str = env_or(option_env!("SWITCHLINK_DEVICE_ID"), "");

/// Core system configuration
#[derive(Debug, Clone)]
pub struct SystemConfig {
    // --- Network ---
    pub wifi_ssid: &'static str,
    pub wifi_password: &'static str,

    // --- Transport ---
    pub transport: TransportKind,
    /// Full URL for the HTTP variant.
    pub http_endpoint: &'static str,
    /// Bounded wait for a single HTTP POST (milliseconds)
    pub http_timeout_ms: u32,
    pub mqtt_host: &'static str,
    pub mqtt_port: u16,
    /// Broker client ID; `None` means "use the device ID".
    pub mqtt_client_id: Option<&'static str>,
    pub mqtt_username: Option<&'static str>,
    pub mqtt_password: Option<&'static str>,
    /// Enterprise segment of the MQTT topic.
    pub enterprise_id: &'static str,

    // --- Identity ---
    /// Fixed device ID; `None` derives one from the factory MAC.
    pub device_id_override: Option<&'static str>,
    pub device_id_prefix: &'static str,

    // --- Switches ---
    pub switch_pins: [i32; pins::SWITCH_COUNT],
    /// Debounce window (milliseconds)
    pub debounce_ms: u32,
    /// Main loop tick period (milliseconds); must be below the debounce window
    pub poll_interval_ms: u32,

    // --- Retry policy ---
    pub wifi_reconnect_cooldown_ms: u32,
    pub mqtt_reconnect_cooldown_ms: u32,
    /// Boot-time association polls
    pub boot_connect_attempts: u32,
    pub boot_connect_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Network
            wifi_ssid: WIFI_SSID,
            wifi_password: WIFI_PASSWORD,

            // Transport (build.rs rejects unknown names)
            transport: TransportKind::from_name(TRANSPORT).unwrap_or(TransportKind::Http),
            http_endpoint: HTTP_ENDPOINT,
            http_timeout_ms: 5000,
            mqtt_host: MQTT_HOST,
            mqtt_port: 1883,
            mqtt_client_id: non_empty(MQTT_CLIENT_ID),
            mqtt_username: non_empty(MQTT_USERNAME),
            mqtt_password: non_empty(MQTT_PASSWORD),
            enterprise_id: ENTERPRISE_ID,

            // Identity
            device_id_override: non_empty(DEVICE_ID_OVERRIDE),
            device_id_prefix: "ESP32-",

            // Switches
            switch_pins: pins::SWITCH_GPIOS,
            debounce_ms: 50,
            poll_interval_ms: 10,

            // Retry policy
            wifi_reconnect_cooldown_ms: 5000,
            mqtt_reconnect_cooldown_ms: 5000,
            boot_connect_attempts: 20,
            boot_connect_interval_ms: 500,
        }
    }
}

impl SystemConfig {
    /// Reject configurations the firmware cannot run correctly with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        if self.poll_interval_ms >= self.debounce_ms {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be smaller than debounce_ms",
            ));
        }
        if self.wifi_reconnect_cooldown_ms == 0 || self.mqtt_reconnect_cooldown_ms == 0 {
            return Err(ConfigError::ValidationFailed("reconnect cooldowns must be > 0"));
        }
        validate_ssid(self.wifi_ssid)
            .map_err(|_| ConfigError::ValidationFailed("wifi_ssid must be 1-32 printable ASCII bytes"))?;
        validate_password(self.wifi_password)
            .map_err(|_| ConfigError::ValidationFailed("wifi_password must be empty or 8-64 bytes"))?;

        match self.transport {
            TransportKind::Http => {
                if self.http_endpoint.is_empty() {
                    return Err(ConfigError::ValidationFailed("http_endpoint is empty"));
                }
                if self.http_timeout_ms == 0 {
                    return Err(ConfigError::ValidationFailed("http_timeout_ms must be > 0"));
                }
            }
            TransportKind::Mqtt => {
                if self.mqtt_host.is_empty() {
                    return Err(ConfigError::ValidationFailed("mqtt_host is empty"));
                }
                if self.mqtt_port == 0 {
                    return Err(ConfigError::ValidationFailed("mqtt_port must be > 0"));
                }
                if self.enterprise_id.is_empty() {
                    return Err(ConfigError::ValidationFailed("enterprise_id is empty"));
                }
            }
        }
        Ok(())
    }
}
