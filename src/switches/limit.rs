//! Per-petal home limit switch.
//!
//! Wraps one debounced input and maps the electrical level to "petal is
//! home" according to the configured closed level. The closing state
//! machine treats this as a hard stop: motion halts the tick the switch
//! reads closed, regardless of the commanded target.

use super::debounce::DebounceCell;

pub struct LimitSwitch {
    cell: DebounceCell,
    closed_level: bool,
}

impl LimitSwitch {
    /// Petals are assumed home at boot, so the cell seeds at the closed level.
    pub fn new(interval_ms: u64, closed_level: bool) -> Self {
        Self {
            cell: DebounceCell::new(closed_level, interval_ms),
            closed_level,
        }
    }

    /// Feed the raw pin level at `now_ms`.
    pub fn update(&mut self, raw: bool, now_ms: u64) {
        self.cell.update(raw, now_ms);
    }

    /// Debounced "petal sits on its home stop".
    pub fn closed(&self) -> bool {
        self.cell.stable() == self.closed_level
    }
}
