//! Transport-level tests: identity, topic limits and variant dispatch.

use switchlink::adapters::device_id::{self, DeviceId, MAX_DEVICE_ID_LEN};
use switchlink::app::events::{SwitchEvent, SwitchState};
use switchlink::app::ports::EventPublisher;
use switchlink::error::Error;
use switchlink::transport::mqtt::{TOPIC_CAPACITY, mqtt_topic};
use switchlink::transport::payload::{PAYLOAD_CAPACITY, encode};
use switchlink::transport::{HttpPublisher, MqttPublisher, Transport};

use crate::mock_hw::{Call, Journal, MockBroker, RecordingHttp};

/// Bytes of the fixed topic segments around the two IDs.
const TOPIC_FIXED: usize = "enterprise/".len() + "/device/".len() + "/switch/event".len();

#[test]
fn mac_derived_id_reaches_the_payload() {
    let id = DeviceId::resolve(None, "ESP32-", &device_id::read_mac()).unwrap();
    let ev = SwitchEvent {
        switch_index: 0,
        state: SwitchState::Pressed,
        timestamp_ms: 1,
    };
    let body = encode(&id, &ev).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["deviceId"], "ESP32-DEADBEEFCAFE");
}

#[test]
fn longest_topic_that_fits() {
    let id = DeviceId::parse(&"D".repeat(MAX_DEVICE_ID_LEN)).unwrap();
    let room = TOPIC_CAPACITY - TOPIC_FIXED - MAX_DEVICE_ID_LEN;

    let topic = mqtt_topic(&"e".repeat(room), &id).unwrap();
    assert_eq!(topic.len(), TOPIC_CAPACITY);

    assert!(matches!(
        mqtt_topic(&"e".repeat(room + 1), &id),
        Err(Error::Config(_))
    ));
}

#[test]
fn mqtt_publisher_rejects_oversize_topic_at_construction() {
    let journal = Journal::default();
    let id = DeviceId::parse("dev").unwrap();
    let result = MqttPublisher::new(MockBroker::new(&journal, true), 5000, &"e".repeat(200), id);
    assert!(result.is_err());
}

#[test]
fn payload_buffer_holds_every_valid_event() {
    let id = DeviceId::parse(&"Z".repeat(MAX_DEVICE_ID_LEN)).unwrap();
    for state in [SwitchState::Pressed, SwitchState::Released] {
        let ev = SwitchEvent {
            switch_index: 2,
            state,
            timestamp_ms: u64::MAX,
        };
        assert!(encode(&id, &ev).unwrap().len() <= PAYLOAD_CAPACITY);
    }
}

#[test]
fn http_variant_has_no_session() {
    let journal = Journal::default();
    let publisher = HttpPublisher::new(
        RecordingHttp::new(&journal, Ok(200)),
        "http://collector.test/",
        DeviceId::parse("dev").unwrap(),
    );
    let mut transport: Transport<RecordingHttp, MockBroker> = Transport::Http(publisher);

    transport.ensure_session(0, true);
    transport.pump();
    assert!(journal.calls().is_empty());
    assert_eq!(transport.name(), "http");
    assert!(!transport.is_session_based());
}

#[test]
fn mqtt_variant_dispatches_session_calls() {
    let journal = Journal::default();
    let publisher = MqttPublisher::new(
        MockBroker::new(&journal, true),
        5000,
        "acme",
        DeviceId::parse("dev").unwrap(),
    )
    .unwrap();
    let mut transport: Transport<RecordingHttp, MockBroker> = Transport::Mqtt(publisher);

    transport.ensure_session(0, true);
    assert_eq!(journal.calls(), vec![Call::BrokerConnect]);
    assert_eq!(transport.name(), "mqtt");
    assert!(transport.is_session_based());

    let ev = SwitchEvent {
        switch_index: 1,
        state: SwitchState::Released,
        timestamp_ms: 9,
    };
    transport.publish(&ev).unwrap();
    assert!(matches!(
        &journal.calls()[1],
        Call::MqttPublish { topic, .. } if topic == "enterprise/acme/device/dev/switch/event"
    ));
}
