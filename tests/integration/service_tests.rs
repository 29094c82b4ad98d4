//! End-to-end tests for the SwitchService → transport pipeline.
//!
//! Each test wires the real supervisor, switch array and publishers to
//! the journal-backed mocks and drives the main loop tick by tick.

use switchlink::app::service::{SwitchService, TickReport};
use switchlink::app::supervisor::{LinkState, LinkSupervisor};
use switchlink::adapters::device_id::DeviceId;
use switchlink::drivers::switch_array::SwitchArray;
use switchlink::error::{Error, SendFailure};
use switchlink::pins::SWITCH_GPIOS;
use switchlink::transport::{HttpPublisher, MqttPublisher, Transport};

use crate::mock_hw::{Call, FakeDelay, Journal, MockBroker, MockLink, RecordingHttp, ScriptedInput};

const TICK_MS: u64 = 10;
const DEBOUNCE_MS: u32 = 50;
const COOLDOWN_MS: u32 = 5000;
const ENDPOINT: &str = "http://collector.test/switch/event";
const TOPIC: &str = "enterprise/acme/device/ESP32-DEADBEEFCAFE/switch/event";

type Svc = SwitchService<MockLink, Transport<RecordingHttp, MockBroker>, 3>;

fn device_id() -> DeviceId {
    DeviceId::parse("ESP32-DEADBEEFCAFE").unwrap()
}

fn http_service(
    journal: &Journal,
    wifi: MockLink,
    reply: Result<u16, SendFailure>,
    input: &mut ScriptedInput,
) -> Svc {
    let publisher = HttpPublisher::new(RecordingHttp::new(journal, reply), ENDPOINT, device_id());
    SwitchService::new(
        LinkSupervisor::new("wifi", wifi, COOLDOWN_MS),
        Transport::Http(publisher),
        SwitchArray::new(SWITCH_GPIOS, DEBOUNCE_MS, input, 0),
    )
}

fn mqtt_service(journal: &Journal, wifi: MockLink, broker: MockBroker, input: &mut ScriptedInput) -> Svc {
    let publisher = MqttPublisher::new(broker, COOLDOWN_MS, "acme", device_id()).unwrap();
    SwitchService::new(
        LinkSupervisor::new("wifi", wifi, COOLDOWN_MS),
        Transport::Mqtt(publisher),
        SwitchArray::new(SWITCH_GPIOS, DEBOUNCE_MS, input, 0),
    )
}

/// Tick every `TICK_MS` over `[from, to]` and sum the reports.
fn run(svc: &mut Svc, input: &mut ScriptedInput, from: u64, to: u64) -> TickReport {
    let mut total = TickReport::default();
    let mut now = from;
    while now <= to {
        let r = svc.tick(now, input);
        total.transitions += r.transitions;
        total.delivered += r.delivered;
        total.dropped += r.dropped;
        if r.last_error.is_some() {
            total.last_error = r.last_error;
        }
        now += TICK_MS;
    }
    total
}

fn posts(journal: &Journal) -> Vec<String> {
    journal
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::HttpPost { body, .. } => Some(body),
            _ => None,
        })
        .collect()
}

// ── HTTP ─────────────────────────────────────────────────────

#[test]
fn http_press_and_release_each_posted_once() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = http_service(&journal, MockLink::new(&journal, true), Ok(200), &mut input);

    run(&mut svc, &mut input, 0, 100);
    input.press(1);
    let pressed = run(&mut svc, &mut input, 110, 300);
    input.release(1);
    let released = run(&mut svc, &mut input, 310, 500);

    assert_eq!(pressed.delivered, 1);
    assert_eq!(released.delivered, 1);

    let bodies = posts(&journal);
    assert_eq!(bodies.len(), 2);
    assert!(bodies[0].contains(r#""switchId":1,"state":1"#));
    assert!(bodies[1].contains(r#""switchId":1,"state":0"#));
    assert!(bodies.iter().all(|b| b.contains(r#""deviceId":"ESP32-DEADBEEFCAFE""#)));
}

#[test]
fn http_posts_to_configured_endpoint() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = http_service(&journal, MockLink::new(&journal, true), Ok(201), &mut input);

    input.press(0);
    run(&mut svc, &mut input, 0, 200);

    let urls: Vec<String> = journal
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::HttpPost { url, .. } => Some(url),
            _ => None,
        })
        .collect();
    assert_eq!(urls, vec![ENDPOINT.to_owned()]);
}

#[test]
fn http_failure_is_not_retried() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = http_service(&journal, MockLink::new(&journal, true), Ok(503), &mut input);

    input.press(2);
    let report = run(&mut svc, &mut input, 0, 1000);

    assert_eq!(report.transitions, 1);
    assert_eq!(report.dropped, 1);
    assert_eq!(report.last_error, Some(Error::SendFailed(SendFailure::HttpStatus(503))));
    assert_eq!(posts(&journal).len(), 1);
}

#[test]
fn events_while_offline_are_dropped() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = http_service(&journal, MockLink::new(&journal, false), Ok(200), &mut input);

    input.press(0);
    let report = run(&mut svc, &mut input, 0, 200);

    assert_eq!(report.dropped, 1);
    assert_eq!(report.last_error, Some(Error::ConnectivityUnavailable));
    assert!(posts(&journal).is_empty());
}

#[test]
fn offline_press_is_not_replayed_after_reconnect() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let wifi = MockLink::new(&journal, false);
    let up = wifi.handle();
    let mut svc = http_service(&journal, wifi, Ok(200), &mut input);

    input.press(0);
    run(&mut svc, &mut input, 0, 200);

    *up.borrow_mut() = true;
    let report = run(&mut svc, &mut input, 210, 1000);
    assert_eq!(report.transitions, 0);
    assert!(posts(&journal).is_empty());
}

#[test]
fn wifi_retries_respect_cooldown() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = http_service(&journal, MockLink::new(&journal, false), Ok(200), &mut input);

    run(&mut svc, &mut input, 0, 12_000);

    // Attempts at 0, 5000 and 10000 ms.
    assert_eq!(journal.count(|c| *c == Call::WifiConnect), 3);
    assert_eq!(svc.network().attempts(), 3);
}

#[test]
fn simultaneous_presses_forwarded_in_index_order() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = http_service(&journal, MockLink::new(&journal, true), Ok(200), &mut input);

    run(&mut svc, &mut input, 0, 50);
    input.press(0);
    input.press(1);
    input.press(2);
    run(&mut svc, &mut input, 60, 300);

    let bodies = posts(&journal);
    assert_eq!(bodies.len(), 3);
    for (i, body) in bodies.iter().enumerate() {
        assert!(body.contains(&format!(r#""switchId":{i},"#)));
    }
}

// ── MQTT ─────────────────────────────────────────────────────

#[test]
fn wifi_comes_before_broker_within_a_tick() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = mqtt_service(
        &journal,
        MockLink::new(&journal, true),
        MockBroker::new(&journal, true),
        &mut input,
    );

    svc.tick(0, &mut input);
    assert_eq!(journal.calls(), vec![Call::WifiConnect, Call::BrokerConnect]);
}

#[test]
fn broker_not_attempted_without_wifi() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = mqtt_service(
        &journal,
        MockLink::new(&journal, false),
        MockBroker::new(&journal, true),
        &mut input,
    );

    run(&mut svc, &mut input, 0, 6000);
    assert_eq!(journal.count(|c| *c == Call::BrokerConnect), 0);
}

#[test]
fn mqtt_publishes_on_device_topic() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let mut svc = mqtt_service(
        &journal,
        MockLink::new(&journal, true),
        MockBroker::new(&journal, true),
        &mut input,
    );

    input.press(1);
    let report = run(&mut svc, &mut input, 0, 200);
    assert_eq!(report.delivered, 1);

    let published: Vec<(String, String)> = journal
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::MqttPublish { topic, body } => Some((topic, body)),
            _ => None,
        })
        .collect();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, TOPIC);
    assert_eq!(
        published[0].1,
        r#"{"deviceId":"ESP32-DEADBEEFCAFE","switchId":1,"state":1,"timestamp":60}"#
    );
}

#[test]
fn wifi_drop_tears_down_broker_and_recovers() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let wifi = MockLink::new(&journal, true);
    let wifi_up = wifi.handle();
    let mut svc = mqtt_service(&journal, wifi, MockBroker::new(&journal, true), &mut input);

    run(&mut svc, &mut input, 0, 990);
    assert!(svc.network().is_connected());

    // Drop Wi-Fi at t=1000. Both cooldowns started at t=0.
    *wifi_up.borrow_mut() = false;
    input.press(0);
    let offline = run(&mut svc, &mut input, 1000, 1200);
    assert_eq!(offline.dropped, 1);
    assert_eq!(offline.last_error, Some(Error::SessionUnavailable));
    assert_eq!(journal.count(|c| *c == Call::BrokerDisconnect), 1);
    assert_eq!(journal.count(|c| matches!(c, Call::MqttPublish { .. })), 0);
    match svc.publisher() {
        Transport::Mqtt(p) => assert_eq!(p.session().state(), LinkState::Disconnected),
        Transport::Http(_) => unreachable!(),
    }

    // No reconnect of either link before the cooldown runs out.
    run(&mut svc, &mut input, 1210, 4990);
    assert_eq!(journal.count(|c| *c == Call::WifiConnect), 1);
    assert_eq!(journal.count(|c| *c == Call::BrokerConnect), 1);

    // t=5000: Wi-Fi back, then the broker on the same tick.
    svc.tick(5000, &mut input);
    assert_eq!(journal.count(|c| *c == Call::WifiConnect), 2);
    assert_eq!(journal.count(|c| *c == Call::BrokerConnect), 2);

    input.release(0);
    let online = run(&mut svc, &mut input, 5010, 5200);
    assert_eq!(online.delivered, 1);
    assert_eq!(journal.count(|c| matches!(c, Call::MqttPublish { .. })), 1);
}

#[test]
fn broker_loss_alone_drops_with_session_error() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let broker = MockBroker::new(&journal, true);
    let broker_up = broker.handle();
    let mut svc = mqtt_service(&journal, MockLink::new(&journal, true), broker, &mut input);

    run(&mut svc, &mut input, 0, 100);
    *broker_up.borrow_mut() = false;
    input.press(2);
    let report = run(&mut svc, &mut input, 110, 300);

    assert_eq!(report.dropped, 1);
    assert_eq!(report.last_error, Some(Error::SessionUnavailable));
    assert!(svc.network().is_connected());
}

// ── Boot ─────────────────────────────────────────────────────

#[test]
fn boot_wait_is_bounded_then_main_loop_retries() {
    let journal = Journal::default();
    let mut input = ScriptedInput::idle();
    let wifi = MockLink::new(&journal, false);
    let up = wifi.handle();

    let mut network = LinkSupervisor::new("wifi", wifi, COOLDOWN_MS);
    let mut delay = FakeDelay::default();
    assert!(!network.boot_connect(0, &mut delay, 20, 500));
    assert_eq!(delay.calls, 20);

    let publisher = HttpPublisher::new(RecordingHttp::new(&journal, Ok(200)), ENDPOINT, device_id());
    let mut svc: Svc = SwitchService::new(
        network,
        Transport::Http(publisher),
        SwitchArray::new(SWITCH_GPIOS, DEBOUNCE_MS, &mut input, 0),
    );

    // Boot attempt at t=0 throttles the loop until t=5000.
    run(&mut svc, &mut input, 10, 4990);
    assert_eq!(journal.count(|c| *c == Call::WifiConnect), 1);

    *up.borrow_mut() = true;
    svc.tick(5000, &mut input);
    assert!(svc.network().is_connected());
}
