//! Switch drivers and peripheral helpers.

pub mod debounce;
pub mod hw_init;
pub mod switch_array;
