//! System configuration parameters
//!
//! All tunable parameters for the petal-cap controller. Values are fixed at
//! boot; there is no runtime reconfiguration of pins or timing.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Input debounce ---
    /// Interval a raw input level must hold before it is accepted (ms)
    pub debounce_interval_ms: u64,
    /// Supervisor recompute cadence, the `next_update` gate period (ms)
    pub switch_poll_interval_ms: u64,

    // --- Actuators ---
    /// Magnet release pulse width (ms)
    pub magnet_pulse_ms: u64,
    /// Motor half-period; the main loop delays this long per iteration (ms)
    pub motor_half_period_ms: u64,

    // --- Motion range ---
    /// Maximum position applied at boot (steps from home)
    pub default_max_position: u32,
    /// Largest max-position value the host may configure
    pub max_position_ceiling: u32,

    // --- Hardware polarity ---
    /// Level a limit switch pin reads when the petal is home (false = LOW)
    pub limit_switch_closed_level: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Debounce
            debounce_interval_ms: 200,
            switch_poll_interval_ms: 50,

            // Actuators
            magnet_pulse_ms: 1000,
            motor_half_period_ms: 100, // 5 full steps per second

            // Motion range
            default_max_position: 280,
            max_position_ceiling: 1000,

            // Polarity: switches pull the line to ground when closed
            limit_switch_closed_level: false,
        }
    }
}

impl SystemConfig {
    /// Reject configurations the control loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_interval_ms == 0 {
            return Err(Error::Config("debounce interval must be non-zero"));
        }
        if self.switch_poll_interval_ms == 0 {
            return Err(Error::Config("switch poll interval must be non-zero"));
        }
        if self.motor_half_period_ms == 0 {
            return Err(Error::Config("motor half-period must be non-zero"));
        }
        if self.default_max_position == 0 {
            return Err(Error::Config("default max position must be non-zero"));
        }
        if self.default_max_position > self.max_position_ceiling {
            return Err(Error::Config("default max position exceeds ceiling"));
        }
        Ok(())
    }
}
