//! Wire payload for both transports.
//!
//! ```json
//! {"deviceId":"ESP32-A1B2C3D4E5F6","switchId":0,"state":1,"timestamp":123456}
//! ```
//!
//! The encoded bytes land in a fixed `heapless::Vec`. A payload that does
//! not fit is rejected with [`Error::SerializationOverflow`]; it is never
//! cut short.

use serde::Serialize;

use crate::adapters::device_id::DeviceId;
use crate::app::events::SwitchEvent;
use crate::error::{Error, Result};

/// Send buffer size shared by the HTTP body and the MQTT payload.
pub const PAYLOAD_CAPACITY: usize = 128;

/// Fixed-size encoded payload.
pub type Payload = heapless::Vec<u8, PAYLOAD_CAPACITY>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchPayload<'a> {
    device_id: &'a str,
    switch_id: u8,
    state: u8,
    timestamp: u64,
}

/// Encode `event` into a buffer of capacity `CAP`.
///
/// Serialises in place; nothing is allocated on the event path.
pub fn encode_into<const CAP: usize>(
    device_id: &DeviceId,
    event: &SwitchEvent,
) -> Result<heapless::Vec<u8, CAP>> {
    let body = SwitchPayload {
        device_id: device_id.as_str(),
        switch_id: event.switch_index,
        state: event.state.code(),
        timestamp: event.timestamp_ms,
    };
    let overflow = Error::SerializationOverflow { capacity: CAP };

    let mut buf = heapless::Vec::<u8, CAP>::new();
    buf.resize_default(CAP).map_err(|()| overflow)?;
    // A full buffer is the only way this flat struct can fail to encode.
    let len = serde_json_core::to_slice(&body, &mut buf).map_err(|_| overflow)?;
    buf.truncate(len);
    Ok(buf)
}

/// Encode `event` into the standard send buffer.
pub fn encode(device_id: &DeviceId, event: &SwitchEvent) -> Result<Payload> {
    encode_into::<PAYLOAD_CAPACITY>(device_id, event)
}
