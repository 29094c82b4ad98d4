//! One-shot GPIO initialization for the switch inputs.
//!
//! Configures each switch pin as an input with the internal pull-up
//! enabled, using raw ESP-IDF sys calls. Called once from `main()` before
//! the switch array takes its first reading.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed { pin: i32, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed { pin, rc } => {
                write!(f, "GPIO {} config failed (rc={})", pin, rc)
            }
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
pub fn init_switch_inputs(pins: &[i32]) -> Result<(), HwInitError> {
    for &pin in pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };
        // SAFETY: called once from main() before the event loop; single-threaded.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed { pin, rc: ret });
        }
    }
    log::info!("hw_init: {} switch inputs configured (pull-up)", pins.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_switch_inputs(pins: &[i32]) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): {} switch inputs, GPIO config skipped", pins.len());
    Ok(())
}

/// Raw level of an input pin; `true` = HIGH.
#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulation: pull-ups hold every input HIGH (released).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}
