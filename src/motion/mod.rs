//! Per-petal motion state machine.
//!
//! ```text
//!            open() ─────────────┐
//!   ┌──────┐                ┌────▼────┐   position == max
//!   │ Idle │                │ Opening │ ────────────────────┐
//!   └──▲───┘                └────┬────┘                     │
//!      │                         │ stop()                   │
//!      ├─────────────────────────┴──────────────────────────┘
//!      │                         ┌─────────┐  limit closed
//!      ├─────────────────────────┤ Closing │◄── close()
//!      │        stop()           └────┬────┘
//!      └──────────────────────────────┘  (position re-referenced to 0)
//! ```
//!
//! One instance per petal. The machine advances exactly one position unit
//! per [`PetalMotion::advance`] call; the caller paces calls at the motor
//! step rate and owns the limit snapshot, so every decision in a tick sees
//! consistent inputs. End stops are enforced here, never by the caller:
//! opening halts at the maximum position, closing halts the tick the home
//! limit reads closed.

use log::info;

use crate::error::CmdStatus;

/// Motion phase of one petal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Opening,
    Closing,
}

/// What one `advance` call did, which tells the caller what to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No motion in progress; nothing to drive.
    Idle,
    /// Took one step in the active direction; motion continues.
    Step,
    /// Took the final step and reached the maximum position; now idle.
    DoneOpen,
    /// Home limit reads closed; now idle, position re-referenced to 0.
    /// No step was taken this call.
    DoneClosed,
}

/// State machine for a single petal.
pub struct PetalMotion {
    id: usize,
    state: MotionState,
    position: u32,
}

impl PetalMotion {
    /// Petals are assumed homed at boot.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            state: MotionState::Idle,
            position: 0,
        }
    }

    /// Begin opening toward `max`. Refused while moving or already there.
    pub fn open(&mut self, max: u32) -> CmdStatus {
        match self.state {
            MotionState::Idle => {
                if self.position >= max {
                    return CmdStatus::Limit;
                }
                self.state = MotionState::Opening;
                info!("petal {}: opening from {}", self.id, self.position);
                CmdStatus::Success
            }
            MotionState::Opening | MotionState::Closing => CmdStatus::NoExe,
        }
    }

    /// Begin closing toward the home limit. Refused while moving or home.
    pub fn close(&mut self, limit_closed: bool) -> CmdStatus {
        match self.state {
            MotionState::Idle => {
                if limit_closed {
                    return CmdStatus::Limit;
                }
                self.state = MotionState::Closing;
                info!("petal {}: closing from {}", self.id, self.position);
                CmdStatus::Success
            }
            MotionState::Opening | MotionState::Closing => CmdStatus::NoExe,
        }
    }

    /// Halt immediately, retaining the current position. Stopping an idle
    /// petal succeeds too.
    pub fn stop(&mut self) -> CmdStatus {
        if self.state != MotionState::Idle {
            info!("petal {}: stopped at {}", self.id, self.position);
            self.state = MotionState::Idle;
        }
        CmdStatus::Success
    }

    /// Advance one step of the active motion.
    ///
    /// `limit_closed` is the debounced home-limit value sampled at the top
    /// of the current tick; `max` is the configured maximum position.
    pub fn advance(&mut self, limit_closed: bool, max: u32) -> StepOutcome {
        match self.state {
            MotionState::Idle => StepOutcome::Idle,

            MotionState::Opening => {
                self.position = self.position.saturating_add(1).min(max);
                if self.position >= max {
                    self.state = MotionState::Idle;
                    info!("petal {}: open complete at {}", self.id, self.position);
                    StepOutcome::DoneOpen
                } else {
                    StepOutcome::Step
                }
            }

            MotionState::Closing => {
                if limit_closed {
                    self.state = MotionState::Idle;
                    // The switch is the position reference, not the count.
                    self.position = 0;
                    info!("petal {}: home", self.id);
                    StepOutcome::DoneClosed
                } else {
                    // A late or broken switch must not underflow the count.
                    self.position = self.position.saturating_sub(1);
                    StepOutcome::Step
                }
            }
        }
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Position in steps from home.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Signed direction: +1 opening, -1 closing, 0 idle.
    pub fn direction(&self) -> i8 {
        match self.state {
            MotionState::Idle => 0,
            MotionState::Opening => 1,
            MotionState::Closing => -1,
        }
    }

    pub fn moving(&self) -> bool {
        self.state != MotionState::Idle
    }
}
