//! Fixed-capacity array of debounced switch channels.
//!
//! Owns one [`DebounceFilter`] per physical input, in arena-style fixed
//! storage sized by the const generic `N`. Polling never allocates.

use heapless::Vec;
use log::info;

use crate::app::events::SwitchEvent;
use crate::app::ports::SwitchInput;

use super::debounce::DebounceFilter;

/// One physical input and its filter state.
#[derive(Debug, Clone, Copy)]
pub struct SwitchChannel {
    pin: i32,
    filter: DebounceFilter,
}

impl SwitchChannel {
    pub fn pin(&self) -> i32 {
        self.pin
    }

    pub fn filter(&self) -> &DebounceFilter {
        &self.filter
    }
}

pub struct SwitchArray<const N: usize> {
    channels: [SwitchChannel; N],
}

impl<const N: usize> SwitchArray<N> {
    /// Sample every pin once and seed the filters from that reading.
    pub fn new(pins: [i32; N], window_ms: u32, input: &mut impl SwitchInput, now_ms: u64) -> Self {
        let channels = pins.map(|pin| {
            let level = input.read_level(pin);
            SwitchChannel {
                pin,
                filter: DebounceFilter::new(level, now_ms, window_ms),
            }
        });

        for (index, ch) in channels.iter().enumerate() {
            info!(
                "  Switch {}: GPIO {} (initial state: {})",
                index,
                ch.pin,
                ch.filter.state().label()
            );
        }

        Self { channels }
    }

    pub fn channels(&self) -> &[SwitchChannel; N] {
        &self.channels
    }

    /// Poll every channel once, in index order. Returns the transitions
    /// committed on this tick, lowest index first.
    pub fn tick(&mut self, now_ms: u64, input: &mut impl SwitchInput) -> Vec<SwitchEvent, N> {
        let mut events = Vec::new();

        for (index, ch) in self.channels.iter_mut().enumerate() {
            let raw = input.read_level(ch.pin);
            if let Some(transition) = ch.filter.update(raw, now_ms) {
                info!("Switch {}: {}", index, transition.state.label());
                // Capacity equals channel count: at most one event per channel.
                let _ = events.push(SwitchEvent {
                    switch_index: index as u8,
                    state: transition.state,
                    timestamp_ms: transition.at_ms,
                });
            }
        }

        events
    }
}
