//! Unified error types for the petal-cap firmware.
//!
//! Two disjoint vocabularies live here. [`CmdStatus`] is the host-visible
//! outcome of a motion command, a fixed status byte that the serial protocol
//! maps onto its reply codes. [`Error`] covers infrastructure failures
//! (peripheral init, configuration, transport) that never reach the host as
//! a status byte. All variants are `Copy` so they pass through the control
//! loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Host-visible command status
// ---------------------------------------------------------------------------

/// Outcome of a petal motion command.
///
/// Every public operation on the motion layer returns one of these instead of
/// aborting; recovery (re-issuing the command) is the caller's business.
/// The discriminant is the status byte exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CmdStatus {
    /// Command accepted and executed.
    Success = 0x00,
    /// Petal id outside 0..=3; no state change.
    WrongId = 0x01,
    /// Petal already moving; command rejected, motion continues.
    NoExe = 0x02,
    /// Relevant end already reached (max position or home limit), or a
    /// max-position value out of range; no state change.
    Limit = 0x03,
    /// Command not in the recognized vocabulary; treated as no-op.
    IllCmd = 0x04,
    /// Automatic-origin command rejected while Mode is Manual.
    Manual = 0x05,
    /// Motor power stage disabled; open/close rejected regardless of mode.
    Disabled = 0x06,
}

impl CmdStatus {
    /// Return the raw status byte.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// `true` for [`CmdStatus::Success`].
    pub const fn accepted(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for CmdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::WrongId => write!(f, "wrong petal id"),
            Self::NoExe => write!(f, "petal already moving"),
            Self::Limit => write!(f, "limit reached"),
            Self::IllCmd => write!(f, "illegal command"),
            Self::Manual => write!(f, "manual mode active"),
            Self::Disabled => write!(f, "power stage disabled"),
        }
    }
}

// ---------------------------------------------------------------------------
// Infrastructure errors
// ---------------------------------------------------------------------------

/// Every fallible infrastructure operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
    /// Serial transport failed.
    Transport(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Transport(msg) => write!(f, "transport: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
