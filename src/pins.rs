//! GPIO pin assignments for the SwitchLink board.
//!
//! Single source of truth — the switch array and GPIO init reference this
//! module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Switch inputs (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Switch 0. LOW = pressed, HIGH = released.
pub const SWITCH_0_GPIO: i32 = 25;
/// Switch 1.
pub const SWITCH_1_GPIO: i32 = 26;
/// Switch 2.
pub const SWITCH_2_GPIO: i32 = 27;

/// Number of physical switch channels on the board.
pub const SWITCH_COUNT: usize = 3;

/// Channel-index order: index 0 is reported as `switchId` 0, and so on.
pub const SWITCH_GPIOS: [i32; SWITCH_COUNT] = [SWITCH_0_GPIO, SWITCH_1_GPIO, SWITCH_2_GPIO];
