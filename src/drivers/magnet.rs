//! Release magnet driver (low-side MOSFET per petal coil).
//!
//! The coil overcomes the holding magnet so a petal can leave its seat.
//! Pulse timing lives in the switch supervisor; this driver is a dumb
//! actuator that mirrors the requested level onto the gate pin.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;
use crate::PETAL_COUNT;

pub struct MagnetDriver {
    energized: [bool; PETAL_COUNT],
}

impl MagnetDriver {
    pub fn new() -> Self {
        Self {
            energized: [false; PETAL_COUNT],
        }
    }

    /// Energize or release one petal's coil.
    pub fn set(&mut self, petal: usize, on: bool) {
        if petal >= PETAL_COUNT {
            return;
        }
        hw_init::gpio_write(pins::MAGNET_GPIO[petal], on);
        self.energized[petal] = on;
    }

    pub fn is_energized(&self, petal: usize) -> bool {
        self.energized.get(petal).copied().unwrap_or(false)
    }
}

impl Default for MagnetDriver {
    fn default() -> Self {
        Self::new()
    }
}
