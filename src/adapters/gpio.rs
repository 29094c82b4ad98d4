//! GPIO-backed [`SwitchInput`].
//!
//! Reads the raw pin level straight from the GPIO input register. Pins
//! must already be configured by
//! [`init_switch_inputs`](crate::drivers::hw_init::init_switch_inputs).

use crate::app::events::Level;
use crate::app::ports::SwitchInput;
use crate::drivers::hw_init::gpio_read;

#[derive(Debug, Default, Clone, Copy)]
pub struct GpioSwitchInput;

impl SwitchInput for GpioSwitchInput {
    fn read_level(&mut self, pin: i32) -> Level {
        Level::from_bool(gpio_read(pin))
    }
}
