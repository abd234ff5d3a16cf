//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The adapter on the other
//! side decides what to do with them — today that is the serial log.

use crate::error::CmdStatus;
use crate::switches::Mode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started.
    Started,

    /// The supervisor changed the process mode.
    ModeChanged { mode: Mode },

    /// A petal began moving (`opening` = direction).
    MotionStarted { petal: usize, opening: bool },

    /// A petal was stopped by an explicit stop, holding `position`.
    MotionStopped { petal: usize, position: u32 },

    /// A petal reached the maximum position and halted by itself.
    OpenComplete { petal: usize },

    /// A petal reached its home limit and halted by itself.
    CloseComplete { petal: usize },

    /// A panel-originated motion request was refused.
    CommandRejected { petal: usize, status: CmdStatus },

    /// A release-magnet pulse began for `petal`.
    MagnetPulsed { petal: usize },

    /// The host reconfigured the maximum position.
    MaxPositionChanged { value: u32 },

    /// The motor power stage dropped out.
    DriveLost,

    /// The motor power stage is back.
    DriveRestored,
}
