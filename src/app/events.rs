//! Switch levels, logical states, and the events the poller emits.
//!
//! The hardware is active-low. The LOW → pressed inversion happens exactly
//! once, in [`SwitchState::from_level`], which only the debounce filter
//! calls. Everything downstream speaks [`SwitchState`].

/// Instantaneous electrical level of a GPIO input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub fn from_bool(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

/// Debounced, externally reported state of a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SwitchState {
    Released = 0,
    Pressed = 1,
}

impl SwitchState {
    /// Active-low mapping: LOW = physically pressed.
    pub const fn from_level(level: Level) -> Self {
        match level {
            Level::Low => Self::Pressed,
            Level::High => Self::Released,
        }
    }

    /// Wire value: 1 = pressed, 0 = released.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pressed => "PRESSED",
            Self::Released => "RELEASED",
        }
    }
}

/// One debounced state change. Produced by the switch array, consumed
/// immediately by the transport, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchEvent {
    pub switch_index: u8,
    pub state: SwitchState,
    /// Monotonic milliseconds since boot at commit time.
    pub timestamp_ms: u64,
}
