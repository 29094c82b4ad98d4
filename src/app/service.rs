//! Application service — the hexagonal core.
//!
//! [`SwitchService`] owns the Wi-Fi supervisor, the active transport and
//! the debounced switch array. One call to [`SwitchService::tick`] is one
//! pass of the main loop.
//!
//! ```text
//!  SwitchInput ──▶ ┌──────────────────────────┐ ──▶ EventPublisher
//!                  │      SwitchService        │
//!  Wi-Fi link  ◀──▶│ Supervisor · SwitchArray  │
//!                  └──────────────────────────┘
//! ```
//!
//! Each tick runs, in this order:
//!
//! 1. Wi-Fi reconnect step (cooldown-gated)
//! 2. Transport session step (MQTT only, gated on Wi-Fi)
//! 3. Transport housekeeping
//! 4. Switch poll, forwarding every committed transition
//!
//! A transition that cannot be delivered is logged and dropped. Nothing
//! is queued for later.

use log::{debug, warn};

use super::events::SwitchEvent;
use super::ports::{ConnectivityPort, EventPublisher, SwitchInput};
use super::supervisor::LinkSupervisor;
use crate::drivers::switch_array::SwitchArray;
use crate::error::{Error, Result};

/// What a single tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Debounced transitions committed on this tick.
    pub transitions: u8,
    pub delivered: u8,
    pub dropped: u8,
    /// Most recent delivery failure, if any.
    pub last_error: Option<Error>,
}

pub struct SwitchService<L, P, const N: usize> {
    network: LinkSupervisor<L>,
    publisher: P,
    switches: SwitchArray<N>,
}

impl<L: ConnectivityPort, P: EventPublisher, const N: usize> SwitchService<L, P, N> {
    pub fn new(network: LinkSupervisor<L>, publisher: P, switches: SwitchArray<N>) -> Self {
        debug!("service: {} switches via {}", N, publisher.name());
        Self {
            network,
            publisher,
            switches,
        }
    }

    pub fn network(&self) -> &LinkSupervisor<L> {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut LinkSupervisor<L> {
        &mut self.network
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    pub fn switches(&self) -> &SwitchArray<N> {
        &self.switches
    }

    /// One main-loop pass at `now_ms`.
    pub fn tick(&mut self, now_ms: u64, input: &mut impl SwitchInput) -> TickReport {
        self.network.ensure_connected(now_ms);
        let network_up = self.network.is_connected();

        self.publisher.ensure_session(now_ms, network_up);
        self.publisher.pump();

        let mut report = TickReport::default();
        for event in self.switches.tick(now_ms, input) {
            report.transitions += 1;
            match self.forward(&event) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(
                        "Switch {}: {} event dropped: {}",
                        event.switch_index,
                        event.state.label(),
                        e
                    );
                    report.dropped += 1;
                    report.last_error = Some(e);
                }
            }
        }
        report
    }

    fn forward(&mut self, event: &SwitchEvent) -> Result<()> {
        // A session transport answers for itself once it has seen the drop.
        if !self.network.is_connected() && !self.publisher.is_session_based() {
            return Err(Error::ConnectivityUnavailable);
        }
        self.publisher.publish(event)
    }
}
