//! SwitchLink Firmware — Main Entry Point
//!
//! Three debounced switches, reported over HTTP or MQTT once Wi-Fi is up.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioSwitchInput   MonotonicClock   WifiAdapter                │
//! │  (SwitchInput)     (Clock)          (Connectivity)             │
//! │  EspHttpClient     EspBrokerSession                            │
//! │  (HttpPort)        (BrokerSession)                             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              SwitchService (pure logic)                │    │
//! │  │  LinkSupervisor · SwitchArray · Transport              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

#[cfg(target_os = "espidf")]
fn main() -> Result<()> {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    use switchlink::adapters::device_id::{self, DeviceId};
    use switchlink::adapters::gpio::GpioSwitchInput;
    use switchlink::adapters::http_client::EspHttpClient;
    use switchlink::adapters::mqtt_session::EspBrokerSession;
    use switchlink::adapters::time::MonotonicClock;
    use switchlink::adapters::wifi::{WifiAdapter, WifiCredentials};
    use switchlink::app::ports::Clock;
    use switchlink::app::service::SwitchService;
    use switchlink::app::supervisor::LinkSupervisor;
    use switchlink::config::{SystemConfig, TransportKind};
    use switchlink::drivers::hw_init;
    use switchlink::drivers::switch_array::SwitchArray;
    use switchlink::transport::{HttpPublisher, MqttPublisher, Transport};

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SwitchLink v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Switch inputs ──────────────────────────────────────
    hw_init::init_switch_inputs(&config.switch_pins)?;
    let clock = MonotonicClock::new();
    let mut input = GpioSwitchInput;
    let switches = SwitchArray::new(config.switch_pins, config.debounce_ms, &mut input, clock.now_ms());

    // ── 3. Identity ───────────────────────────────────────────
    let device_id = DeviceId::resolve(
        config.device_id_override,
        config.device_id_prefix,
        &device_id::read_mac(),
    )?;
    info!("Device ID: {}", device_id);

    // ── 4. Wi-Fi ──────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let creds = WifiCredentials::new(config.wifi_ssid, config.wifi_password)?;
    let wifi = WifiAdapter::new(peripherals.modem, sysloop, nvs, &creds)?;
    let mut network = LinkSupervisor::new("wifi", wifi, config.wifi_reconnect_cooldown_ms);
    network.boot_connect(
        clock.now_ms(),
        &mut FreeRtos,
        config.boot_connect_attempts,
        config.boot_connect_interval_ms,
    );

    // ── 5. Transport ──────────────────────────────────────────
    let transport: Transport<EspHttpClient, EspBrokerSession> = match config.transport {
        TransportKind::Http => {
            info!("Transport: HTTP POST to {}", config.http_endpoint);
            Transport::Http(HttpPublisher::new(
                EspHttpClient::new(config.http_timeout_ms),
                config.http_endpoint,
                device_id,
            ))
        }
        TransportKind::Mqtt => {
            let client_id = match config.mqtt_client_id {
                Some(id) => DeviceId::parse(id)?,
                None => device_id.clone(),
            };
            let session = EspBrokerSession::new(
                config.mqtt_host,
                config.mqtt_port,
                &client_id,
                config.mqtt_username,
                config.mqtt_password,
            );
            Transport::Mqtt(MqttPublisher::new(
                session,
                config.mqtt_reconnect_cooldown_ms,
                config.enterprise_id,
                device_id,
            )?)
        }
    };

    // ── 6. Main loop ──────────────────────────────────────────
    let mut service = SwitchService::new(network, transport, switches);
    info!("Entering main loop ({} ms tick)", config.poll_interval_ms);

    loop {
        let report = service.tick(clock.now_ms(), &mut input);
        if report.transitions > 0 {
            log::debug!(
                "tick: {} transitions, {} delivered, {} dropped",
                report.transitions,
                report.delivered,
                report.dropped
            );
        }
        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}

/// Host build: no radio, no GPIO. Runs the switch poller against the
/// simulation adapters for a few seconds and exits.
#[cfg(not(target_os = "espidf"))]
fn main() -> Result<()> {
    use switchlink::adapters::device_id::{self, DeviceId};
    use switchlink::adapters::gpio::GpioSwitchInput;
    use switchlink::adapters::time::MonotonicClock;
    use switchlink::adapters::wifi::{WifiAdapter, WifiCredentials};
    use switchlink::app::events::SwitchEvent;
    use switchlink::app::ports::{Clock, EventPublisher};
    use switchlink::app::service::SwitchService;
    use switchlink::app::supervisor::LinkSupervisor;
    use switchlink::config::SystemConfig;
    use switchlink::drivers::switch_array::SwitchArray;
    use switchlink::transport::payload;

    /// Logs each encoded payload instead of sending it.
    struct ConsolePublisher {
        device_id: DeviceId,
        sent: u32,
    }

    impl EventPublisher for ConsolePublisher {
        fn publish(&mut self, event: &SwitchEvent) -> switchlink::error::Result<()> {
            let body = payload::encode(&self.device_id, event)?;
            info!("sim: would send {}", String::from_utf8_lossy(&body));
            self.sent += 1;
            Ok(())
        }

        fn name(&self) -> &'static str {
            "console"
        }
    }

    env_logger::init();
    info!("SwitchLink v{} (host simulation)", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    let clock = MonotonicClock::new();
    let mut input = GpioSwitchInput;
    let switches = SwitchArray::new(config.switch_pins, config.debounce_ms, &mut input, clock.now_ms());

    let device_id = DeviceId::resolve(
        config.device_id_override,
        config.device_id_prefix,
        &device_id::read_mac(),
    )?;
    let creds = WifiCredentials::new("SimNet", "")?;
    let network = LinkSupervisor::new("wifi", WifiAdapter::new(creds), config.wifi_reconnect_cooldown_ms);
    let publisher = ConsolePublisher { device_id, sent: 0 };

    let mut service = SwitchService::new(network, publisher, switches);
    for _ in 0..200 {
        service.tick(clock.now_ms(), &mut input);
        std::thread::sleep(std::time::Duration::from_millis(u64::from(config.poll_interval_ms)));
    }
    info!("sim: done, {} events sent", service.publisher().sent);
    Ok(())
}
