//! Inbound host commands.
//!
//! These represent the serial-protocol vocabulary after parsing.  The
//! protocol engine turns a received frame into a [`HostCommand`] and the
//! [`AppService`](super::service::AppService) acts on it; anything that
//! fails to parse never reaches the service at all.

/// Commands the host can issue over the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// `v` — firmware identification string.
    Version,
    /// `fN` — limit switch state of petal N (reply `1` = open, `0` = closed).
    GetLimitSwitch { petal: usize },
    /// `pN` — position of petal N in steps from home.
    GetPosition { petal: usize },
    /// `mN` — motion state of petal N (reply `1` = moving).
    GetMoving { petal: usize },
    /// `M` — current maximum position.
    GetMaxPosition,
    /// `aN` — start opening petal N.
    OpenPetal { petal: usize },
    /// `cN` — start closing petal N.
    ClosePetal { petal: usize },
    /// `sN` — stop petal N.
    StopMotor { petal: usize },
    /// `S` — stop every petal.
    StopAll,
    /// `ixxx` — set the maximum position; echoes the value on success.
    SetMaxPosition { value: u32 },
    /// `dN` — per-petal debug internals.
    DebugInfo { petal: usize },
}

impl HostCommand {
    /// Parse one frame (already stripped of the `:` terminator).
    ///
    /// Returns `None` for anything malformed; the petal index is parsed but
    /// not range-checked here — the service answers out-of-range ids with
    /// its own status so the host can tell a bad index from a bad verb.
    pub fn parse(frame: &str) -> Option<Self> {
        let frame = frame.trim();
        let mut chars = frame.chars();
        let verb = chars.next()?;
        let arg = chars.as_str();

        match (verb, arg.is_empty()) {
            ('v', true) => Some(Self::Version),
            ('M', true) => Some(Self::GetMaxPosition),
            ('S', true) => Some(Self::StopAll),
            ('f', false) => Some(Self::GetLimitSwitch { petal: arg.parse().ok()? }),
            ('p', false) => Some(Self::GetPosition { petal: arg.parse().ok()? }),
            ('m', false) => Some(Self::GetMoving { petal: arg.parse().ok()? }),
            ('a', false) => Some(Self::OpenPetal { petal: arg.parse().ok()? }),
            ('c', false) => Some(Self::ClosePetal { petal: arg.parse().ok()? }),
            ('s', false) => Some(Self::StopMotor { petal: arg.parse().ok()? }),
            ('i', false) => Some(Self::SetMaxPosition { value: arg.parse().ok()? }),
            ('d', false) => Some(Self::DebugInfo { petal: arg.parse().ok()? }),
            _ => None,
        }
    }
}
