//! Open/close push-button pair with one-shot request semantics.
//!
//! A request fires on the press edge of a debounced line and never repeats
//! while the button is held. Both buttons reading pressed in the same cycle
//! is ambiguous input and yields no request at all, never "last one wins".

use super::debounce::DebounceCell;

/// Manual motion request produced by a press edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRequest {
    Open,
    Close,
}

pub struct PushButtons {
    open: DebounceCell,
    close: DebounceCell,
}

impl PushButtons {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            open: DebounceCell::new(false, interval_ms),
            close: DebounceCell::new(false, interval_ms),
        }
    }

    /// Feed the raw button levels (`true` = pressed) at `now_ms`.
    ///
    /// Returns `Some` only on the cycle a debounced press edge lands and the
    /// other button is not pressed; `None` is "no request".
    pub fn update(&mut self, open_raw: bool, close_raw: bool, now_ms: u64) -> Option<ButtonRequest> {
        let open_edge = self.open.update(open_raw, now_ms) && self.open.stable();
        let close_edge = self.close.update(close_raw, now_ms) && self.close.stable();

        match (open_edge, close_edge) {
            (true, true) => None,
            (true, false) if !self.close.stable() => Some(ButtonRequest::Open),
            (false, true) if !self.open.stable() => Some(ButtonRequest::Close),
            _ => None,
        }
    }

    /// Debounced "open button held" level.
    pub fn open_held(&self) -> bool {
        self.open.stable()
    }

    /// Debounced "close button held" level.
    pub fn close_held(&self) -> bool {
        self.close.stable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edge_fires_once() {
        let mut b = PushButtons::new(100);
        assert_eq!(b.update(true, false, 0), None);
        assert_eq!(b.update(true, false, 100), Some(ButtonRequest::Open));
        // Held: no repeat.
        assert_eq!(b.update(true, false, 200), None);
        assert_eq!(b.update(true, false, 500), None);
    }

    #[test]
    fn release_edge_is_not_a_request() {
        let mut b = PushButtons::new(100);
        b.update(false, true, 0);
        assert_eq!(b.update(false, true, 100), Some(ButtonRequest::Close));
        b.update(false, false, 200);
        assert_eq!(b.update(false, false, 300), None);
    }

    #[test]
    fn simultaneous_press_edges_yield_nothing() {
        let mut b = PushButtons::new(100);
        b.update(true, true, 0);
        assert_eq!(b.update(true, true, 100), None);
        assert_eq!(b.update(true, true, 200), None);
    }

    #[test]
    fn press_while_other_held_yields_nothing() {
        let mut b = PushButtons::new(100);
        b.update(true, false, 0);
        assert_eq!(b.update(true, false, 100), Some(ButtonRequest::Open));
        // Close pressed while open still held.
        b.update(true, true, 200);
        assert_eq!(b.update(true, true, 300), None);
    }

    #[test]
    fn new_press_after_release_fires_again() {
        let mut b = PushButtons::new(100);
        b.update(true, false, 0);
        assert_eq!(b.update(true, false, 100), Some(ButtonRequest::Open));
        b.update(false, false, 200);
        b.update(false, false, 300);
        b.update(true, false, 400);
        assert_eq!(b.update(true, false, 500), Some(ButtonRequest::Open));
    }
}
