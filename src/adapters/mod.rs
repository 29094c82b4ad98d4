//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to               |
//! |----------------|--------------------|---------------------------|
//! | `gpio`         | SwitchInput        | ESP32 GPIO input register |
//! | `time`         | Clock              | ESP32 high-res timer      |
//! | `wifi`         | ConnectivityPort   | ESP-IDF Wi-Fi STA         |
//! | `http_client`  | HttpPort           | ESP-IDF HTTP(S) client    |
//! | `mqtt_session` | BrokerSession      | ESP-IDF MQTT client       |
//! | `device_id`    | —                  | eFuse factory MAC         |
//!
//! `http_client` and `mqtt_session` exist only on the device target; host
//! builds substitute the mocks under `tests/`.

pub mod device_id;
pub mod gpio;
#[cfg(target_os = "espidf")]
pub mod http_client;
#[cfg(target_os = "espidf")]
pub mod mqtt_session;
pub mod time;
pub(super) mod utils;
pub mod wifi;
