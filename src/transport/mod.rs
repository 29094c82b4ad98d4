//! Outbound transports.
//!
//! Exactly one variant is active per build, chosen from
//! [`TransportKind`](crate::config::TransportKind). Both share the same
//! payload encoder.

pub mod http;
pub mod mqtt;
pub mod payload;

use crate::app::events::SwitchEvent;
use crate::app::ports::{BrokerSession, EventPublisher, HttpPort};
use crate::error::Result;

pub use http::HttpPublisher;
pub use mqtt::MqttPublisher;

pub enum Transport<H, S> {
    Http(HttpPublisher<H>),
    Mqtt(MqttPublisher<S>),
}

impl<H: HttpPort, S: BrokerSession> EventPublisher for Transport<H, S> {
    fn is_session_based(&self) -> bool {
        match self {
            Self::Http(p) => p.is_session_based(),
            Self::Mqtt(p) => p.is_session_based(),
        }
    }

    fn ensure_session(&mut self, now_ms: u64, network_up: bool) {
        match self {
            Self::Http(p) => p.ensure_session(now_ms, network_up),
            Self::Mqtt(p) => p.ensure_session(now_ms, network_up),
        }
    }

    fn pump(&mut self) {
        match self {
            Self::Http(p) => p.pump(),
            Self::Mqtt(p) => p.pump(),
        }
    }

    fn publish(&mut self, event: &SwitchEvent) -> Result<()> {
        match self {
            Self::Http(p) => p.publish(event),
            Self::Mqtt(p) => p.publish(event),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Http(p) => p.name(),
            Self::Mqtt(p) => p.name(),
        }
    }
}
