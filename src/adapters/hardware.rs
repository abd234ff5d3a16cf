//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the motor and magnet drivers and the raw input lines, exposing
//! them through [`InputPort`], [`MotorPort`] and [`MagnetPort`].  This is
//! the only module in the system that knows the panel wiring is
//! active-low.  On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use crate::app::ports::{InputPort, MagnetPort, MotorPort};
use crate::drivers::hw_init;
use crate::drivers::magnet::MagnetDriver;
use crate::drivers::motor::MotorDriver;
use crate::pins;
use crate::switches::InputSnapshot;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    motor: MotorDriver,
    magnets: MagnetDriver,
}

impl HardwareAdapter {
    pub fn new(motor: MotorDriver, magnets: MagnetDriver) -> Self {
        Self { motor, magnets }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn sample(&mut self) -> InputSnapshot {
        InputSnapshot {
            // Panel contacts ground their line when engaged.
            selector: pins::SELECTOR_GPIO.map(|pin| !hw_init::gpio_read(pin)),
            open_button: !hw_init::gpio_read(pins::OPEN_BUTTON_GPIO),
            close_button: !hw_init::gpio_read(pins::CLOSE_BUTTON_GPIO),
            mode_manual: !hw_init::gpio_read(pins::MODE_TOGGLE_GPIO),
            // Raw levels; closed polarity belongs to SystemConfig.
            limits: pins::LIMIT_SWITCH_GPIO.map(hw_init::gpio_read),
            drive_enabled: hw_init::gpio_read(pins::DRIVE_ENABLE_GPIO),
        }
    }
}

// ── MotorPort implementation ──────────────────────────────────

impl MotorPort for HardwareAdapter {
    fn set_direction(&mut self, petal: usize, opening: bool) {
        self.motor.set_direction(petal, opening);
    }

    fn step(&mut self, petal: usize) {
        self.motor.step(petal);
    }
}

// ── MagnetPort implementation ─────────────────────────────────

impl MagnetPort for HardwareAdapter {
    fn set_magnet(&mut self, petal: usize, energized: bool) {
        self.magnets.set(petal, energized);
    }
}
