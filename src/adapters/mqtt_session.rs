//! ESP-IDF MQTT broker session.
//!
//! Implements [`BrokerSession`]. A connection attempt builds an
//! `EspMqttClient` whose event callback updates a [`SessionFlags`]. A
//! client that is still
//! handshaking is kept across attempts; it is only rebuilt after it has
//! reported `Disconnected` or `Error`. Dropping the client closes the
//! session.

use embedded_svc::mqtt::client::{EventPayload, QoS};
use esp_idf_svc::mqtt::client::{EspMqttClient, MqttClientConfiguration};
use log::{info, warn};

use super::device_id::DeviceId;
use super::wifi::SessionFlags;
use crate::app::ports::{BrokerSession, ConnectivityPort};
use crate::error::SendFailure;

pub struct EspBrokerSession {
    url: String,
    client_id: DeviceId,
    username: Option<&'static str>,
    password: Option<&'static str>,
    client: Option<EspMqttClient<'static>>,
    flags: SessionFlags,
}

impl EspBrokerSession {
    pub fn new(
        host: &str,
        port: u16,
        client_id: &DeviceId,
        username: Option<&'static str>,
        password: Option<&'static str>,
    ) -> Self {
        Self {
            url: format!("mqtt://{host}:{port}"),
            client_id: client_id.clone(),
            username,
            password,
            client: None,
            flags: SessionFlags::default(),
        }
    }
}

impl ConnectivityPort for EspBrokerSession {
    fn try_connect(&mut self) -> bool {
        // The handshake can outlast the cooldown. Let it finish.
        if !self.flags.needs_new_client(self.client.is_some()) {
            info!("MQTT: handshake with {} still pending", self.url);
            return true;
        }
        self.client = None;
        self.flags.reset();

        let conf = MqttClientConfiguration {
            client_id: Some(self.client_id.as_str()),
            username: self.username,
            password: self.password,
            ..Default::default()
        };

        let flags = self.flags.clone();
        let created = EspMqttClient::new_cb(&self.url, &conf, move |event| match event.payload() {
            EventPayload::Connected(_) => flags.mark_connected(),
            EventPayload::Disconnected => flags.mark_disconnected(),
            EventPayload::Error(e) => {
                warn!("MQTT: client error: {e:?}");
                flags.mark_error();
            }
            _ => {}
        });

        match created {
            Ok(client) => {
                info!("MQTT: connecting to {} as '{}'", self.url, self.client_id);
                self.client = Some(client);
                true
            }
            Err(e) => {
                warn!("MQTT: client create failed: {e}");
                false
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.client.is_some() && self.flags.is_connected()
    }

    fn disconnect(&mut self) {
        self.client = None;
        self.flags.reset();
    }
}

impl BrokerSession for EspBrokerSession {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), SendFailure> {
        let client = self.client.as_mut().ok_or(SendFailure::NotConnected)?;
        client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .map(|_| ())
            .map_err(|e| {
                warn!("MQTT: publish failed: {e}");
                SendFailure::Publish
            })
    }
}
