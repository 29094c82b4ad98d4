//! Unified error types for the SwitchLink firmware.
//!
//! Every runtime failure in the reporting path is non-fatal: the main loop
//! logs it, drops the affected event, and carries on with the next tick.
//! All variants are `Copy` so they pass through the orchestrator without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Wi-Fi is not associated; nothing can leave the device.
    ConnectivityUnavailable,
    /// The broker session is down (MQTT only).
    SessionUnavailable,
    /// The transport accepted the payload but delivery failed.
    SendFailed(SendFailure),
    /// The encoded payload does not fit the fixed send buffer.
    SerializationOverflow { capacity: usize },
    /// Peripheral or network initialisation failed.
    Init(&'static str),
    /// Configuration or identity is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectivityUnavailable => write!(f, "network not associated"),
            Self::SessionUnavailable => write!(f, "broker session not connected"),
            Self::SendFailed(e) => write!(f, "send failed: {e}"),
            Self::SerializationOverflow { capacity } => {
                write!(f, "payload does not fit the {capacity} byte buffer")
            }
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Delivery failures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendFailure {
    /// Server answered with a non-2xx status.
    HttpStatus(u16),
    /// Connection could not be opened or broke mid-request.
    Connection,
    /// Broker client refused the publish.
    Publish,
    /// No underlying client exists.
    NotConnected,
}

impl fmt::Display for SendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::Connection => write!(f, "connection error"),
            Self::Publish => write!(f, "publish rejected"),
            Self::NotConnected => write!(f, "client not connected"),
        }
    }
}

impl From<SendFailure> for Error {
    fn from(e: SendFailure) -> Self {
        Self::SendFailed(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
