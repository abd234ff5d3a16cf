//! Hold-stable debounce primitive shared by every panel input.
//!
//! A raw sample becomes the stable value only after it has held the new
//! level continuously for the full debounce interval. A flicker that
//! reverts before the interval expires restarts nothing visible: the
//! stable value never moves. Contact bounce on the selector wafer and the
//! push buttons is far shorter than the default 200 ms window.
//!
//! The cell never blocks and touches no hardware; callers sample the pin
//! and pass the raw level together with the monotonic clock.

/// One debounced digital line.
#[derive(Debug, Clone, Copy)]
pub struct DebounceCell {
    interval_ms: u64,
    stable: bool,
    /// Last raw level seen that differs from `stable`.
    candidate: bool,
    /// When `candidate` started holding its current level.
    candidate_since_ms: u64,
}

impl DebounceCell {
    pub fn new(initial: bool, interval_ms: u64) -> Self {
        Self {
            interval_ms,
            stable: initial,
            candidate: initial,
            candidate_since_ms: 0,
        }
    }

    /// Feed one raw sample at `now_ms`.
    ///
    /// Returns `true` exactly when the stable value commits to a new level
    /// this call (the commit edge), `false` otherwise.
    pub fn update(&mut self, raw: bool, now_ms: u64) -> bool {
        if raw == self.stable {
            // Any pending candidate is abandoned.
            self.candidate = raw;
            return false;
        }

        if raw != self.candidate {
            // A differing level starts (or restarts) its hold window.
            self.candidate = raw;
            self.candidate_since_ms = now_ms;
            return false;
        }

        if now_ms.wrapping_sub(self.candidate_since_ms) >= self.interval_ms {
            self.stable = raw;
            return true;
        }

        false
    }

    /// Current debounced level.
    pub fn stable(&self) -> bool {
        self.stable
    }
}
