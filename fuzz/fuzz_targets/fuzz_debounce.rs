//! Fuzz target: `DebounceFilter::update`
//!
//! Each input byte is one sample: bit 0 is the raw level, the upper bits
//! the time step (1..=128 ms). Asserts that committed transitions strictly
//! alternate and that the reported state always matches the last commit.
//!
//! cargo fuzz run fuzz_debounce

#![no_main]

use libfuzzer_sys::fuzz_target;
use switchlink::app::events::{Level, SwitchState};
use switchlink::drivers::debounce::DebounceFilter;

fuzz_target!(|data: &[u8]| {
    let mut filter = DebounceFilter::new(Level::High, 0, 50);
    let mut now = 0u64;
    let mut last = SwitchState::Released;
    let mut last_commit_at = 0u64;

    for &byte in data {
        now += u64::from(byte >> 1) + 1;
        let raw = Level::from_bool(byte & 1 == 1);
        if let Some(t) = filter.update(raw, now) {
            assert_ne!(t.state, last, "commit without a state change");
            assert_eq!(t.state, SwitchState::from_level(raw));
            assert!(t.at_ms > last_commit_at);
            last = t.state;
            last_commit_at = t.at_ms;
        }
        assert_eq!(filter.state(), last);
    }
});
