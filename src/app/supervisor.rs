//! Connect-with-cooldown supervisor.
//!
//! One state machine, instantiated twice: around the Wi-Fi station and
//! around the MQTT broker session. The two drop independently, so each
//! supervisor keeps its own cooldown clock.
//!
//! ```text
//!               cooldown elapsed
//!  Disconnected ───────────────▶ Connecting ──link up──▶ Connected
//!       ▲                          │  ▲                     │
//!       │                          └──┘ cooldown elapsed,   │
//!       │                               still not up:       │
//!       │                               attempt again       │
//!       └────────────────────── link lost ──────────────────┘
//! ```
//!
//! ## Attempt policy
//!
//! At most one attempt per cooldown window, steady state. The very first
//! call is always eligible. [`LinkSupervisor::boot_connect`] is the single
//! blocking exception, used once before the main loop starts.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use super::ports::ConnectivityPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

pub struct LinkSupervisor<C> {
    label: &'static str,
    link: C,
    state: LinkState,
    cooldown_ms: u64,
    last_attempt_ms: Option<u64>,
    attempts: u32,
}

impl<C: ConnectivityPort> LinkSupervisor<C> {
    pub fn new(label: &'static str, link: C, cooldown_ms: u32) -> Self {
        Self {
            label,
            link,
            state: LinkState::Disconnected,
            cooldown_ms: u64::from(cooldown_ms),
            last_attempt_ms: None,
            attempts: 0,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    /// Total connection attempts issued since construction.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_attempt_ms(&self) -> Option<u64> {
        self.last_attempt_ms
    }

    pub fn link(&self) -> &C {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut C {
        &mut self.link
    }

    /// Idempotent reconnect step. Returns `true` only when an attempt was
    /// issued on this call.
    pub fn ensure_connected(&mut self, now_ms: u64) -> bool {
        if self.observe() == LinkState::Connected {
            return false;
        }
        if !self.cooldown_elapsed(now_ms) {
            return false;
        }

        self.last_attempt_ms = Some(now_ms);
        self.attempts = self.attempts.saturating_add(1);
        self.state = LinkState::Connecting;

        if self.link.try_connect() {
            info!("{}: connection attempt {} started", self.label, self.attempts);
        } else {
            warn!(
                "{}: connection attempt {} could not be started (next in {} ms)",
                self.label, self.attempts, self.cooldown_ms
            );
        }

        // Links that associate synchronously (simulation) are picked up now.
        self.observe();
        true
    }

    /// Fold the link's current boolean into the state machine, logging
    /// each edge once.
    pub fn observe(&mut self) -> LinkState {
        let up = self.link.is_connected();
        match (self.state, up) {
            (LinkState::Connected, false) => {
                warn!("{}: link lost", self.label);
                self.state = LinkState::Disconnected;
            }
            (LinkState::Disconnected | LinkState::Connecting, true) => {
                info!("{}: connected", self.label);
                self.state = LinkState::Connected;
                self.link.on_connected();
            }
            _ => {}
        }
        self.state
    }

    /// Drop the link on request of a dependent layer. The cooldown clock
    /// is left untouched.
    pub fn disconnect(&mut self) {
        self.link.disconnect();
        if self.state != LinkState::Disconnected {
            info!("{}: disconnected", self.label);
        }
        self.state = LinkState::Disconnected;
    }

    /// Boot-time connect: one attempt, then wait up to `polls` ×
    /// `interval_ms` for the link to come up.
    ///
    /// The attempt counts towards the steady-state cooldown.
    pub fn boot_connect(
        &mut self,
        now_ms: u64,
        delay: &mut impl DelayNs,
        polls: u32,
        interval_ms: u32,
    ) -> bool {
        info!("{}: waiting for first connection (up to {} x {} ms)", self.label, polls, interval_ms);
        self.ensure_connected(now_ms);

        for poll in 0..polls {
            if self.observe() == LinkState::Connected {
                break;
            }
            delay.delay_ms(interval_ms);
            log::debug!("{}: boot wait {}/{}", self.label, poll + 1, polls);
        }

        let connected = self.observe() == LinkState::Connected;
        if !connected {
            warn!("{}: not connected after boot wait, retrying from main loop", self.label);
        }
        connected
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        match self.last_attempt_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.cooldown_ms,
        }
    }
}
