//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SwitchService (domain)
//! ```
//!
//! Driven adapters (GPIO, Wi-Fi, HTTP client, broker session, clock)
//! implement these traits. The [`SwitchService`](super::service::SwitchService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::error::{Result, SendFailure};

use super::events::{Level, SwitchEvent};

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait Clock {
    /// Milliseconds since boot. Never goes backwards.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Switch input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw digital sampling of the switch inputs.
pub trait SwitchInput {
    /// Instantaneous level of `pin`. No filtering.
    fn read_level(&mut self, pin: i32) -> Level;
}

// ───────────────────────────────────────────────────────────────
// Connectivity port (Wi-Fi association, broker session)
// ───────────────────────────────────────────────────────────────

/// A link that can be asked to connect and observed for connectedness.
///
/// Both the Wi-Fi station and the MQTT broker session implement this;
/// [`LinkSupervisor`](super::supervisor::LinkSupervisor) layers the
/// cooldown policy on top so neither adapter re-implements it.
pub trait ConnectivityPort {
    /// Start a connection attempt without blocking.
    /// Returns `false` if the attempt could not even be initiated.
    fn try_connect(&mut self) -> bool;

    /// Current association state. Backed by a single boolean that an
    /// asynchronous event callback may flip.
    fn is_connected(&self) -> bool;

    /// Tear the link down.
    fn disconnect(&mut self);

    /// Called once on every rising edge the supervisor observes.
    fn on_connected(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Transport ports (driven adapters: domain → network)
// ───────────────────────────────────────────────────────────────

/// A stateless HTTP client: one call, one connection, one POST.
pub trait HttpPort {
    /// POST `body` as `application/json` to `url`; returns the status code.
    fn post_json(&mut self, url: &str, body: &[u8]) -> core::result::Result<u16, SendFailure>;
}

/// A broker session that can carry QoS 0 publishes once connected.
pub trait BrokerSession: ConnectivityPort {
    /// Publish without retain at QoS 0.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> core::result::Result<(), SendFailure>;
}

/// The capability set every transport variant exposes to the main loop.
pub trait EventPublisher {
    /// Keep a session-based transport connected. Stateless transports
    /// leave the default no-op.
    fn ensure_session(&mut self, _now_ms: u64, _network_up: bool) {}

    /// Whether delivery rides on a session that tracks Wi-Fi itself.
    /// Session-less transports are refused by the service while the
    /// network is down.
    fn is_session_based(&self) -> bool {
        false
    }

    /// Service transport-internal housekeeping (keep-alive, edge detection).
    fn pump(&mut self) {}

    /// Deliver one event, at most once.
    fn publish(&mut self, event: &SwitchEvent) -> Result<()>;

    /// Short human-readable name for logs.
    fn name(&self) -> &'static str;
}
