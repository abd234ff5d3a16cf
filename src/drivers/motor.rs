//! Stepper motor driver (DRV8825 breakout, one per petal).
//!
//! Two lines per petal: a direction latch and a step pulse. Each call
//! to [`MotorDriver::step`] emits one complete pulse, so one call moves
//! the petal by exactly one position unit. Pacing lives in the main
//! loop, which steps each petal at most once per half-period; position
//! accounting and end-stop handling live above in the motion layer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;
use crate::PETAL_COUNT;

/// STEP high time in µs. The DRV8825 datasheet minimum is 1.9 µs.
#[cfg(target_os = "espidf")]
const PULSE_WIDTH_US: u32 = 2;

pub struct MotorDriver {
    opening: [bool; PETAL_COUNT],
    steps: [u32; PETAL_COUNT],
}

impl MotorDriver {
    pub fn new() -> Self {
        Self {
            opening: [false; PETAL_COUNT],
            steps: [0; PETAL_COUNT],
        }
    }

    /// Latch the travel direction of one petal. HIGH = opening.
    pub fn set_direction(&mut self, petal: usize, opening: bool) {
        if petal >= PETAL_COUNT {
            return;
        }
        hw_init::gpio_write(pins::MOTOR_DIR_GPIO[petal], opening);
        self.opening[petal] = opening;
    }

    /// Emit one step pulse on one petal's motor.
    pub fn step(&mut self, petal: usize) {
        if petal >= PETAL_COUNT {
            return;
        }
        let pin = pins::MOTOR_PULSE_GPIO[petal];
        hw_init::gpio_write(pin, true);
        pulse_hold();
        hw_init::gpio_write(pin, false);
        self.steps[petal] = self.steps[petal].wrapping_add(1);
    }

    /// Last latched direction of one petal.
    pub fn opening(&self, petal: usize) -> bool {
        self.opening.get(petal).copied().unwrap_or(false)
    }

    /// Pulses emitted on one petal since boot.
    pub fn step_count(&self, petal: usize) -> u32 {
        self.steps.get(petal).copied().unwrap_or(0)
    }
}

impl Default for MotorDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
fn pulse_hold() {
    // SAFETY: busy-wait CPU intrinsic, no shared state.
    unsafe {
        esp_idf_svc::sys::esp_rom_delay_us(PULSE_WIDTH_US);
    }
}

#[cfg(not(target_os = "espidf"))]
fn pulse_hold() {}
