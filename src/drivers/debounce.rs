//! Per-channel debounce filter.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up. The main loop
//! samples the raw level every tick (10 ms) and feeds it to
//! [`DebounceFilter::update`].
//!
//! ## Algorithm
//!
//! | Step | Condition                                   | Effect                    |
//! |------|---------------------------------------------|---------------------------|
//! | 1    | raw != last raw                             | restart window at `now`   |
//! | 2    | held > window and raw != stable             | commit, emit `Transition` |
//! | 3    | otherwise                                   | nothing                   |
//!
//! Every bounce restarts the window, so a level only commits once it has
//! held steady for longer than the window. The tick period must be
//! strictly smaller than the window or whole bounces go unseen.

use crate::app::events::{Level, SwitchState};

/// A committed stable-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: SwitchState,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceFilter {
    window_ms: u64,
    raw_last: Level,
    stable: Level,
    last_change_ms: u64,
}

impl DebounceFilter {
    /// Seed from the first reading so boot never produces an event.
    pub fn new(initial: Level, now_ms: u64, window_ms: u32) -> Self {
        Self {
            window_ms: u64::from(window_ms),
            raw_last: initial,
            stable: initial,
            last_change_ms: now_ms,
        }
    }

    /// Debounced, externally visible state.
    pub fn state(&self) -> SwitchState {
        SwitchState::from_level(self.stable)
    }

    /// Feed one raw sample. Returns a transition exactly when the stable
    /// state changes.
    pub fn update(&mut self, raw: Level, now_ms: u64) -> Option<Transition> {
        if raw != self.raw_last {
            self.last_change_ms = now_ms;
            self.raw_last = raw;
        }

        let held_ms = now_ms.saturating_sub(self.last_change_ms);
        if held_ms > self.window_ms && raw != self.stable {
            self.stable = raw;
            return Some(Transition {
                state: SwitchState::from_level(raw),
                at_ms: now_ms,
            });
        }

        None
    }
}
