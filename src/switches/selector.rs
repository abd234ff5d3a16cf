//! Petal selector — four-position rotary switch, one line per petal.
//!
//! Each line runs through its own [`DebounceCell`]. After debounce the
//! selected index is the single active line; zero active lines (wafer
//! between detents) or more than one (contact overlap) leave the previous
//! selection in place. That is a normal transient, not an error.

use super::debounce::DebounceCell;

pub struct Selector {
    cells: [DebounceCell; 4],
    active_index: usize,
}

impl Selector {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            cells: [DebounceCell::new(false, interval_ms); 4],
            active_index: 0,
        }
    }

    /// Feed the four raw line levels (`true` = line engaged) at `now_ms`.
    /// Returns the possibly-updated selection.
    pub fn update(&mut self, raw: &[bool; 4], now_ms: u64) -> usize {
        for (cell, &level) in self.cells.iter_mut().zip(raw.iter()) {
            cell.update(level, now_ms);
        }

        let mut selected = None;
        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.stable() {
                if selected.is_some() {
                    // Two lines active at once: keep the previous selection.
                    return self.active_index;
                }
                selected = Some(idx);
            }
        }

        if let Some(idx) = selected {
            self.active_index = idx;
        }
        self.active_index
    }

    /// Currently selected petal.
    pub fn active_index(&self) -> usize {
        self.active_index
    }
}
