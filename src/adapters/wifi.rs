//! Wi-Fi station-mode adapter.
//!
//! Implements [`ConnectivityPort`]. Association is asynchronous: the
//! adapter only *starts* a connection attempt; system-event callbacks flip
//! a shared [`LinkFlag`] when the station gets an IP or drops. The
//! [`LinkSupervisor`](crate::app::supervisor::LinkSupervisor) decides when
//! to try again.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF Wi-Fi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stub for host-side tests.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(not(target_os = "espidf"))]
use log::info;

use super::utils::is_printable_ascii;
use crate::app::ports::ConnectivityPort;

// ───────────────────────────────────────────────────────────────
// Errors and validation
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    DriverInit,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(
                f,
                "password invalid (must be 8-64 bytes for WPA2, or empty for open)"
            ),
            Self::DriverInit => write!(f, "Wi-Fi driver initialisation failed"),
        }
    }
}

impl core::error::Error for ConnectivityError {}

pub fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

/// Station credentials, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
}

impl WifiCredentials {
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        let mut creds = Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
        };
        creds.ssid.push_str(ssid).map_err(|()| ConnectivityError::InvalidSsid)?;
        creds
            .password
            .push_str(password)
            .map_err(|()| ConnectivityError::InvalidPassword)?;
        Ok(creds)
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Open network (no passphrase).
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// Shared connectivity flag
// ───────────────────────────────────────────────────────────────

/// Single boolean written by event callbacks and read by the main loop.
#[derive(Debug, Clone, Default)]
pub struct LinkFlag(Arc<AtomicBool>);

impl LinkFlag {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, up: bool) {
        self.0.store(up, Ordering::Release);
    }
}

/// Broker client state as seen from its event callback: the live session,
/// plus a latch set once the handshake or session has failed.
#[derive(Debug, Clone, Default)]
pub struct SessionFlags {
    connected: LinkFlag,
    failed: LinkFlag,
}

impl SessionFlags {
    pub fn mark_connected(&self) {
        self.connected.set(true);
        self.failed.set(false);
    }

    pub fn mark_disconnected(&self) {
        self.connected.set(false);
        self.failed.set(true);
    }

    pub fn mark_error(&self) {
        self.failed.set(true);
    }

    pub fn reset(&self) {
        self.connected.set(false);
        self.failed.set(false);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    /// A client that has not reported a failure may still finish its
    /// handshake and is kept.
    pub fn needs_new_client(&self, has_client: bool) -> bool {
        !has_client || self.failed.get()
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF adapter
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod platform {
    use esp_idf_svc::eventloop::{EspSubscription, EspSystemEventLoop, System};
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::netif::IpEvent;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi, WifiEvent};
    use log::{info, warn};

    use super::{ConnectivityError, LinkFlag, WifiCredentials};

    pub struct WifiAdapter {
        wifi: EspWifi<'static>,
        connected: LinkFlag,
        _subscriptions: [EspSubscription<'static, System>; 2],
    }

    impl WifiAdapter {
        /// Bring the driver up in STA mode. Does not associate yet.
        pub fn new(
            modem: Modem,
            sysloop: EspSystemEventLoop,
            nvs: EspDefaultNvsPartition,
            creds: &WifiCredentials,
        ) -> Result<Self, ConnectivityError> {
            let mut wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs)).map_err(|e| {
                warn!("Wi-Fi: driver create failed: {e}");
                ConnectivityError::DriverInit
            })?;

            let auth_method = if creds.is_open() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            };
            wifi.set_configuration(&Configuration::Client(ClientConfiguration {
                ssid: creds.ssid().try_into().map_err(|_| ConnectivityError::InvalidSsid)?,
                password: creds
                    .password()
                    .try_into()
                    .map_err(|_| ConnectivityError::InvalidPassword)?,
                auth_method,
                ..Default::default()
            }))
            .map_err(|e| {
                warn!("Wi-Fi: set_configuration failed: {e}");
                ConnectivityError::DriverInit
            })?;

            let connected = LinkFlag::default();

            let on_drop = connected.clone();
            let wifi_sub = sysloop
                .subscribe::<WifiEvent, _>(move |event| {
                    if let WifiEvent::StaDisconnected(_) = event {
                        on_drop.set(false);
                    }
                })
                .map_err(|_| ConnectivityError::DriverInit)?;

            let on_ip = connected.clone();
            let ip_sub = sysloop
                .subscribe::<IpEvent, _>(move |event| {
                    if let IpEvent::DhcpIpAssigned(_) = event {
                        on_ip.set(true);
                    }
                })
                .map_err(|_| ConnectivityError::DriverInit)?;

            wifi.start().map_err(|e| {
                warn!("Wi-Fi: start failed: {e}");
                ConnectivityError::DriverInit
            })?;
            info!("Wi-Fi: STA started, SSID '{}'", creds.ssid());

            Ok(Self {
                wifi,
                connected,
                _subscriptions: [wifi_sub, ip_sub],
            })
        }

        pub fn link_flag(&self) -> LinkFlag {
            self.connected.clone()
        }

        pub(super) fn start_connect(&mut self) -> bool {
            match self.wifi.connect() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Wi-Fi: connect request rejected: {e}");
                    false
                }
            }
        }

        pub(super) fn is_up(&self) -> bool {
            self.connected.get()
        }

        pub(super) fn stop(&mut self) {
            if let Err(e) = self.wifi.disconnect() {
                warn!("Wi-Fi: disconnect failed: {e}");
            }
            self.connected.set(false);
        }

        /// Log the assigned address and signal strength.
        pub(super) fn log_link_info(&self) {
            match self.wifi.sta_netif().get_ip_info() {
                Ok(ip) => info!("Wi-Fi: IP address {}", ip.ip),
                Err(e) => warn!("Wi-Fi: IP info unavailable: {e}"),
            }
            let mut ap = esp_idf_svc::sys::wifi_ap_record_t::default();
            // SAFETY: `ap` is a valid out-pointer; the driver is started.
            let rc = unsafe { esp_idf_svc::sys::esp_wifi_sta_get_ap_info(&mut ap) };
            if rc == esp_idf_svc::sys::ESP_OK as i32 {
                info!("Wi-Fi: RSSI {} dBm", ap.rssi);
            }
        }
    }
}

#[cfg(target_os = "espidf")]
pub use platform::WifiAdapter;

// ───────────────────────────────────────────────────────────────
// Simulation adapter
// ───────────────────────────────────────────────────────────────

/// Host stand-in: associates synchronously on every attempt.
#[cfg(not(target_os = "espidf"))]
pub struct WifiAdapter {
    creds: WifiCredentials,
    connected: LinkFlag,
    attempts: u32,
}

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    pub fn new(creds: WifiCredentials) -> Self {
        Self {
            creds,
            connected: LinkFlag::default(),
            attempts: 0,
        }
    }

    /// Handle that tests can use to simulate a drop.
    pub fn link_flag(&self) -> LinkFlag {
        self.connected.clone()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn start_connect(&mut self) -> bool {
        self.attempts = self.attempts.wrapping_add(1);
        info!("Wi-Fi(sim): associating with '{}' (attempt {})", self.creds.ssid(), self.attempts);
        self.connected.set(true);
        true
    }

    fn is_up(&self) -> bool {
        self.connected.get()
    }

    fn stop(&mut self) {
        self.connected.set(false);
    }

    fn log_link_info(&self) {
        info!("Wi-Fi(sim): IP address 192.168.4.2");
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn try_connect(&mut self) -> bool {
        self.start_connect()
    }

    fn is_connected(&self) -> bool {
        self.is_up()
    }

    fn disconnect(&mut self) {
        self.stop();
    }

    fn on_connected(&mut self) {
        self.log_link_info();
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
