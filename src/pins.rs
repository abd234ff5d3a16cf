//! GPIO / peripheral pin assignments for the petal-cap controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Indexed arrays follow petal ids 0..=3.

// ---------------------------------------------------------------------------
// Stepper motors (DRV8825 driver per petal)
// ---------------------------------------------------------------------------

/// Digital outputs: motor direction, one per petal. HIGH = opening.
pub const MOTOR_DIR_GPIO: [i32; 4] = [1, 2, 3, 4];

/// Digital outputs: motor step pulse, one per petal. One rising edge per step.
pub const MOTOR_PULSE_GPIO: [i32; 4] = [5, 6, 7, 8];

/// Digital input: driver power-stage enable sense. HIGH = stage powered.
/// Fed from the emergency-stop chain; open/close commands are refused while
/// it reads LOW.
pub const DRIVE_ENABLE_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Limit switches (home position, one per petal)
// ---------------------------------------------------------------------------

/// Digital inputs with pull-ups. The switch pulls the line LOW when the
/// petal sits on its home stop (see `SystemConfig::limit_switch_closed_level`).
pub const LIMIT_SWITCH_GPIO: [i32; 4] = [10, 11, 12, 13];

// ---------------------------------------------------------------------------
// Release magnets (one coil per petal)
// ---------------------------------------------------------------------------

/// Digital outputs driving the magnet coil MOSFETs. HIGH = coil energized.
pub const MAGNET_GPIO: [i32; 4] = [14, 15, 16, 17];

// ---------------------------------------------------------------------------
// Manual control panel (all inputs active-low with pull-ups)
// ---------------------------------------------------------------------------

/// Rotary selector, one line per petal; the selected position grounds its line.
pub const SELECTOR_GPIO: [i32; 4] = [18, 21, 33, 34];

/// Momentary push-button: start opening the selected petal.
pub const OPEN_BUTTON_GPIO: i32 = 35;
/// Momentary push-button: start closing the selected petal.
pub const CLOSE_BUTTON_GPIO: i32 = 36;

/// Two-position mode switch. LOW = manual, HIGH = automatic.
pub const MODE_TOGGLE_GPIO: i32 = 37;

// ---------------------------------------------------------------------------
// UART console (host command link)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;
