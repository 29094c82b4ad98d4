//! MQTT transport: QoS 0 publishes over a supervised broker session.
//!
//! Topic layout:
//!
//! ```text
//! enterprise/<enterpriseId>/device/<deviceId>/switch/event
//! ```
//!
//! The session has its own [`LinkSupervisor`] and cooldown, independent
//! of Wi-Fi. It is only attempted while the network is up, and it is torn
//! down as soon as the network drops.

use core::fmt::Write;

use log::{info, warn};

use crate::adapters::device_id::DeviceId;
use crate::app::events::SwitchEvent;
use crate::app::ports::{BrokerSession, EventPublisher};
use crate::app::supervisor::LinkSupervisor;
use crate::error::{Error, Result};

use super::payload;

pub const TOPIC_CAPACITY: usize = 128;

pub type Topic = heapless::String<TOPIC_CAPACITY>;

/// Build the event topic. Fails rather than truncating an oversize topic.
pub fn mqtt_topic(enterprise_id: &str, device_id: &DeviceId) -> Result<Topic> {
    let mut topic = Topic::new();
    write!(topic, "enterprise/{}/device/{}/switch/event", enterprise_id, device_id)
        .map_err(|_| Error::Config("mqtt topic longer than 128 bytes"))?;
    Ok(topic)
}

pub struct MqttPublisher<S> {
    session: LinkSupervisor<S>,
    topic: Topic,
    device_id: DeviceId,
}

impl<S: BrokerSession> MqttPublisher<S> {
    pub fn new(session: S, cooldown_ms: u32, enterprise_id: &str, device_id: DeviceId) -> Result<Self> {
        let topic = mqtt_topic(enterprise_id, &device_id)?;
        info!("MQTT: publishing to '{}'", topic);
        Ok(Self {
            session: LinkSupervisor::new("mqtt", session, cooldown_ms),
            topic,
            device_id,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn session(&self) -> &LinkSupervisor<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut LinkSupervisor<S> {
        &mut self.session
    }
}

impl<S: BrokerSession> EventPublisher for MqttPublisher<S> {
    fn is_session_based(&self) -> bool {
        true
    }

    fn ensure_session(&mut self, now_ms: u64, network_up: bool) {
        if network_up {
            self.session.ensure_connected(now_ms);
        } else if self.session.is_connected() || self.session.link().is_connected() {
            self.session.disconnect();
        }
    }

    fn pump(&mut self) {
        self.session.observe();
    }

    fn publish(&mut self, event: &SwitchEvent) -> Result<()> {
        if !self.session.is_connected() {
            return Err(Error::SessionUnavailable);
        }
        let body = payload::encode(&self.device_id, event)?;
        self.session
            .link_mut()
            .publish(&self.topic, &body)
            .map_err(|e| {
                warn!("MQTT: publish for switch {} failed: {}", event.switch_index, e);
                Error::SendFailed(e)
            })?;
        info!("MQTT: switch {} {} published", event.switch_index, event.state.label());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mqtt"
    }
}
