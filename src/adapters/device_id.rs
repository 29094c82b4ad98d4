//! Device identity derived from the ESP32 factory MAC address.
//!
//! Produces a stable device ID in the form `ESP32-AABBCCDDEEFF` (prefix +
//! all 6 MAC bytes in uppercase hex). This ID is:
//! - Deterministic across reboots (factory-burned eFuse MAC)
//! - Sent as `deviceId` in every payload
//! - Used as the MQTT client ID and topic segment unless overridden

use core::fmt::Write;

use crate::error::{Error, Result};

use super::utils::is_printable_ascii;

/// Longest accepted device ID, in bytes.
pub const MAX_DEVICE_ID_LEN: usize = 32;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Validated device ID. Always printable ASCII without `"` or `\`, so it
/// embeds in JSON and topic strings verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceId(heapless::String<MAX_DEVICE_ID_LEN>);

impl DeviceId {
    /// Accept `id` as-is or reject it. Oversize input is an error, not a
    /// truncation.
    pub fn parse(id: &str) -> Result<Self> {
        if id.is_empty() {
            return Err(Error::Config("device id is empty"));
        }
        if id.len() > MAX_DEVICE_ID_LEN {
            return Err(Error::Config("device id longer than 32 bytes"));
        }
        if !is_printable_ascii(id) || id.contains(['"', '\\']) {
            return Err(Error::Config("device id must be printable ASCII without quotes"));
        }
        let mut s = heapless::String::new();
        s.push_str(id).map_err(|()| Error::Config("device id longer than 32 bytes"))?;
        Ok(Self(s))
    }

    /// Format `prefix` followed by the 12 hex digits of `mac`.
    pub fn from_mac(prefix: &str, mac: &MacAddress) -> Result<Self> {
        let mut s = heapless::String::<MAX_DEVICE_ID_LEN>::new();
        write!(
            s,
            "{}{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            prefix, mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
        )
        .map_err(|_| Error::Config("device id prefix too long"))?;
        Self::parse(&s)
    }

    /// Use the configured override when present, otherwise derive from `mac`.
    pub fn resolve(override_id: Option<&str>, prefix: &str, mac: &MacAddress) -> Result<Self> {
        match override_id {
            Some(id) => Self::parse(id),
            None => Self::from_mac(prefix, mac),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl core::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    // SAFETY: `mac` is a valid 6-byte buffer, the size the API writes.
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}
