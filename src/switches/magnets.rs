//! Release-magnet pulse timers, one per petal.
//!
//! The magnets hold the petals against their closed stops; a fixed-width
//! pulse releases the grip for manual disengagement. This module owns the
//! timing only. The coil pins are synced from [`Magnets::energized`] once
//! per control tick, so the pin level always equals "armed and before the
//! deadline".

use log::debug;

/// Pulse timers for the four release coils.
pub struct Magnets {
    pulse_ms: u64,
    armed: [bool; 4],
    deadline_ms: [u64; 4],
}

impl Magnets {
    pub fn new(pulse_ms: u64) -> Self {
        Self {
            pulse_ms,
            armed: [false; 4],
            deadline_ms: [0; 4],
        }
    }

    /// Arm the pulse for one petal. Re-activation while armed restarts the
    /// window from `now_ms`; it never accumulates beyond one pulse width.
    pub fn activate(&mut self, petal: usize, now_ms: u64) {
        self.armed[petal] = true;
        self.deadline_ms[petal] = now_ms.wrapping_add(self.pulse_ms);
        debug!("magnet {petal}: pulse until t={}", self.deadline_ms[petal]);
    }

    /// Expire any pulse whose deadline has passed. Call every tick,
    /// independent of the supervisor cadence gate.
    pub fn update(&mut self, now_ms: u64) {
        for petal in 0..4 {
            if self.armed[petal] && now_ms >= self.deadline_ms[petal] {
                self.armed[petal] = false;
            }
        }
    }

    /// Whether the coil for `petal` should be energized right now.
    pub fn energized(&self, petal: usize) -> bool {
        self.armed[petal]
    }
}
