//! Fuzz target: `DeviceId::parse` + `payload::encode`
//!
//! Any string `parse` accepts must encode into the fixed send buffer as
//! valid JSON carrying the exact ID back out.
//!
//! cargo fuzz run fuzz_payload

#![no_main]

use libfuzzer_sys::fuzz_target;
use switchlink::adapters::device_id::DeviceId;
use switchlink::app::events::{SwitchEvent, SwitchState};
use switchlink::transport::payload::{PAYLOAD_CAPACITY, encode};

fuzz_target!(|data: &[u8]| {
    let Some((&switch, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = core::str::from_utf8(rest) else {
        return;
    };
    let Ok(id) = DeviceId::parse(text) else {
        return;
    };
    assert_eq!(id.as_str(), text, "parse must never alter the id");

    let event = SwitchEvent {
        switch_index: switch,
        state: if switch & 1 == 0 { SwitchState::Released } else { SwitchState::Pressed },
        timestamp_ms: u64::MAX,
    };
    let body = encode(&id, &event).expect("valid id always fits");
    assert!(body.len() <= PAYLOAD_CAPACITY);

    let value: serde_json::Value = serde_json::from_slice(&body).expect("payload is JSON");
    assert_eq!(value["deviceId"].as_str(), Some(text));
});
