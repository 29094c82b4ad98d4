//! Character-set checks shared by the Wi-Fi and device-identity adapters.

/// `true` if every byte of `s` is in `0x20..=0x7E` (space through tilde).
pub(super) fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}
