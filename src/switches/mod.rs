//! Panel-input supervisor: debounce, mode arbitration, action resolution.
//!
//! Composes the selector, the open/close buttons, the four limit switches,
//! the mode toggle, the drive-enable sense and the magnet timers into one
//! polled decision per cycle:
//!
//! ```text
//!   raw pins ──> debounce cells ──> one Action ──> motion layer
//!                     │
//!                     └─ limit levels back to the closing state machines
//! ```
//!
//! Recomputation is throttled by the `next_update` gate so the sampling
//! cost is bounded no matter how fast the caller loops; magnet timers are
//! serviced on every call so pulse deadlines never wait on the gate.
//!
//! Per gated tick, in order: limit switches, drive-enable and mode toggle,
//! selector, push buttons, then action resolution. The supervisor owns the
//! process Mode; host commands never change it.

pub mod buttons;
pub mod debounce;
pub mod limit;
pub mod magnets;
pub mod selector;

use log::info;

use crate::config::SystemConfig;
use buttons::{ButtonRequest, PushButtons};
use debounce::DebounceCell;
use limit::LimitSwitch;
use magnets::Magnets;
use selector::Selector;

/// Where motion commands are allowed to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Host commands drive the petals; the panel is read but ignored.
    Automatic,
    /// Panel selector and buttons drive the petals; host motion commands
    /// are refused.
    Manual,
}

/// One decision per supervisor cycle. `None` from [`Switches::update`]
/// means "do nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Halt every moving petal this tick.
    Stop,
    SetAutomatic,
    SetManual,
    StartOpen { petal: usize },
    StartClose { petal: usize },
}

/// Raw digital input levels, sampled once per tick by the input port.
///
/// Panel lines arrive already mapped to logic levels (`true` = engaged /
/// pressed / manual / powered); limit switches arrive as raw electrical
/// levels because their closed polarity is configuration-owned.
#[derive(Debug, Clone, Copy)]
pub struct InputSnapshot {
    pub selector: [bool; 4],
    pub open_button: bool,
    pub close_button: bool,
    pub mode_manual: bool,
    pub limits: [bool; 4],
    pub drive_enabled: bool,
}

impl Default for InputSnapshot {
    /// Idle panel: nothing engaged, automatic mode, drive powered,
    /// limit lines at the delivered closed level (LOW).
    fn default() -> Self {
        Self {
            selector: [false; 4],
            open_button: false,
            close_button: false,
            mode_manual: false,
            limits: [false; 4],
            drive_enabled: true,
        }
    }
}

/// The supervisor. Owns Mode, all panel debounce state and the magnet
/// timers; produces at most one [`Action`] per gated cycle.
pub struct Switches {
    mode: Mode,
    poll_interval_ms: u64,
    next_update_ms: u64,
    selector: Selector,
    buttons: PushButtons,
    limits: [LimitSwitch; 4],
    magnets: Magnets,
    mode_toggle: DebounceCell,
    drive_enable: DebounceCell,
}

impl Switches {
    pub fn new(config: &SystemConfig) -> Self {
        let interval = config.debounce_interval_ms;
        Self {
            mode: Mode::Automatic,
            poll_interval_ms: config.switch_poll_interval_ms,
            next_update_ms: 0,
            selector: Selector::new(interval),
            buttons: PushButtons::new(interval),
            limits: [(); 4].map(|()| {
                LimitSwitch::new(interval, config.limit_switch_closed_level)
            }),
            magnets: Magnets::new(config.magnet_pulse_ms),
            mode_toggle: DebounceCell::new(false, interval),
            drive_enable: DebounceCell::new(true, interval),
        }
    }

    /// Run one supervisor cycle.
    ///
    /// `moving` is the aggregate "any petal in motion" flag from the
    /// previous motion update; it decides whether a button press means
    /// start or stop. Returns the action for this cycle, if any.
    pub fn update(&mut self, input: &InputSnapshot, moving: bool, now_ms: u64) -> Option<Action> {
        // Magnet deadlines are honored even while the gate is closed.
        self.magnets.update(now_ms);

        if now_ms < self.next_update_ms {
            return None;
        }
        self.next_update_ms = now_ms.wrapping_add(self.poll_interval_ms);

        for (sw, &raw) in self.limits.iter_mut().zip(input.limits.iter()) {
            sw.update(raw, now_ms);
        }

        let drive_lost =
            self.drive_enable.update(input.drive_enabled, now_ms) && !self.drive_enable.stable();
        self.mode_toggle.update(input.mode_manual, now_ms);

        self.selector.update(&input.selector, now_ms);
        let request = self.buttons.update(input.open_button, input.close_button, now_ms);

        self.resolve(request, drive_lost, moving, now_ms)
    }

    fn resolve(
        &mut self,
        request: Option<ButtonRequest>,
        drive_lost: bool,
        moving: bool,
        now_ms: u64,
    ) -> Option<Action> {
        // The power-stage chain outranks everything, including mode changes.
        if drive_lost && moving {
            info!("drive enable lost, stopping all petals");
            return Some(Action::Stop);
        }

        // A press while anything moves is a stop gesture, in manual mode.
        if self.mode == Mode::Manual && moving && request.is_some() {
            info!("panel stop (button during motion)");
            return Some(Action::Stop);
        }

        // Mode follows the toggle level; emission only on disagreement
        // keeps repeated sets idempotent.
        let want_manual = self.mode_toggle.stable();
        match (self.mode, want_manual) {
            (Mode::Automatic, true) => {
                self.mode = Mode::Manual;
                info!("mode -> manual (panel toggle)");
                return Some(Action::SetManual);
            }
            (Mode::Manual, false) => {
                self.mode = Mode::Automatic;
                info!("mode -> automatic (panel toggle)");
                return Some(Action::SetAutomatic);
            }
            _ => {}
        }

        // Panel requests carry weight only in manual mode; in automatic
        // mode the cells were still fed, so debounce continuity holds.
        if self.mode != Mode::Manual {
            return None;
        }

        match request? {
            ButtonRequest::Open => {
                let petal = self.selector.active_index();
                // Release the holding magnet, unless the stage is unpowered.
                if self.drive_enable.stable() {
                    self.magnets.activate(petal, now_ms);
                }
                info!("panel open petal {petal}");
                Some(Action::StartOpen { petal })
            }
            ButtonRequest::Close => {
                let petal = self.selector.active_index();
                info!("panel close petal {petal}");
                Some(Action::StartClose { petal })
            }
        }
    }

    /// Debounced "petal sits on its home stop".
    pub fn limit_closed(&self, petal: usize) -> bool {
        self.limits[petal].closed()
    }

    /// Current process mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Debounced power-stage enable level.
    pub fn drive_enabled(&self) -> bool {
        self.drive_enable.stable()
    }

    /// Currently selected petal on the panel.
    pub fn active_index(&self) -> usize {
        self.selector.active_index()
    }

    /// Whether the release coil for `petal` should be energized this tick.
    pub fn magnet_energized(&self, petal: usize) -> bool {
        self.magnets.energized(petal)
    }
}
