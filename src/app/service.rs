//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the switch supervisor and the four petal state
//! machines.  It exposes the host-facing command API and runs one input
//! cycle per loop tick; all I/O flows through port traits injected at the
//! call sites, so the whole service runs against mock adapters on the host.
//!
//! ```text
//!   InputPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                 │        AppService        │
//!   MotorPort ◀── │  Switches · PetalMotion  │ ──▶ MagnetPort
//!                 └─────────────────────────┘
//! ```
//!
//! Per loop iteration the caller runs [`AppService::tick`] first (inputs,
//! arbitration, magnet sync) and then [`AppService::motor_control`] once
//! per petal, so every motion decision sees the snapshot debounced at the
//! top of the same iteration.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::error::CmdStatus;
use crate::motion::{PetalMotion, StepOutcome};
use crate::switches::{Action, Mode, Switches};
use crate::PETAL_COUNT;

use super::events::AppEvent;
use super::ports::{EventSink, InputPort, MagnetPort, MotorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    switches: Switches,
    petals: [PetalMotion; PETAL_COUNT],
    max_position: u32,
    max_position_ceiling: u32,
    /// Synthetic limit readings used instead of the debounced ones while
    /// test mode is on.
    test_mode: bool,
    fake_limits: [bool; PETAL_COUNT],
    /// Outcome of the most recent host command.
    last_status: CmdStatus,
    drive_was_enabled: bool,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from a validated configuration.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            switches: Switches::new(config),
            petals: core::array::from_fn(PetalMotion::new),
            max_position: config.default_max_position,
            max_position_ceiling: config.max_position_ceiling,
            test_mode: false,
            fake_limits: [false; PETAL_COUNT],
            last_status: CmdStatus::Success,
            drive_was_enabled: true,
            tick_count: 0,
        }
    }

    /// Announce startup through the sink.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!(
            "service started, max_position={}, mode={:?}",
            self.max_position,
            self.switches.mode()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one input cycle: sample → supervise → dispatch → sync magnets.
    ///
    /// The `hw` parameter satisfies all three hardware ports — this avoids
    /// a double mutable borrow while keeping the boundary explicit.  Motion
    /// advancement is *not* part of this call; the loop drives it through
    /// [`Self::motor_control`] right after.
    pub fn tick(
        &mut self,
        hw: &mut (impl InputPort + MotorPort + MagnetPort),
        now_ms: u64,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        let snapshot = hw.sample();
        let moving = self.any_moving();
        let action = self.switches.update(&snapshot, moving, now_ms);

        let drive = self.switches.drive_enabled();
        if drive != self.drive_was_enabled {
            self.drive_was_enabled = drive;
            sink.emit(if drive {
                &AppEvent::DriveRestored
            } else {
                &AppEvent::DriveLost
            });
        }

        if let Some(action) = action {
            self.dispatch(action, hw, sink);
        }

        // Coil level mirrors the timer state, every tick.
        for petal in 0..PETAL_COUNT {
            hw.set_magnet(petal, self.switches.magnet_energized(petal));
        }
    }

    /// Advance one step of one petal's motion. Called once per petal per
    /// loop iteration; also the `MotorControl` host API.
    pub fn motor_control(
        &mut self,
        petal: usize,
        hw: &mut impl MotorPort,
        sink: &mut impl EventSink,
    ) -> CmdStatus {
        if petal >= PETAL_COUNT {
            return CmdStatus::WrongId;
        }

        let limit_closed = self.limit_closed_effective(petal);
        match self.petals[petal].advance(limit_closed, self.max_position) {
            StepOutcome::Idle => {}
            StepOutcome::Step => hw.step(petal),
            StepOutcome::DoneOpen => {
                hw.step(petal);
                sink.emit(&AppEvent::OpenComplete { petal });
            }
            StepOutcome::DoneClosed => {
                sink.emit(&AppEvent::CloseComplete { petal });
            }
        }
        CmdStatus::Success
    }

    // ── Host command API ──────────────────────────────────────

    /// Start opening a petal on host request.
    pub fn open_petal(
        &mut self,
        petal: usize,
        hw: &mut impl MotorPort,
        sink: &mut impl EventSink,
    ) -> CmdStatus {
        let status = self.host_motion_guard(petal).unwrap_or_else(|| {
            let max = self.max_position;
            self.petals[petal].open(max)
        });
        if status.accepted() {
            hw.set_direction(petal, true);
            sink.emit(&AppEvent::MotionStarted { petal, opening: true });
        }
        self.finish_host(status)
    }

    /// Start closing a petal on host request.
    pub fn close_petal(
        &mut self,
        petal: usize,
        hw: &mut impl MotorPort,
        sink: &mut impl EventSink,
    ) -> CmdStatus {
        let status = self.host_motion_guard(petal).unwrap_or_else(|| {
            let limit_closed = self.limit_closed_effective(petal);
            self.petals[petal].close(limit_closed)
        });
        if status.accepted() {
            hw.set_direction(petal, false);
            sink.emit(&AppEvent::MotionStarted { petal, opening: false });
        }
        self.finish_host(status)
    }

    /// Stop one petal on host request. Stopping an idle petal succeeds.
    pub fn stop_motor(&mut self, petal: usize, sink: &mut impl EventSink) -> CmdStatus {
        let status = if petal >= PETAL_COUNT {
            CmdStatus::WrongId
        } else if self.switches.mode() == Mode::Manual {
            CmdStatus::Manual
        } else {
            self.halt_petal(petal, sink);
            CmdStatus::Success
        };
        self.finish_host(status)
    }

    /// Stop every petal on host request.
    pub fn stop_all(&mut self, sink: &mut impl EventSink) -> CmdStatus {
        let status = if self.switches.mode() == Mode::Manual {
            CmdStatus::Manual
        } else {
            for petal in 0..PETAL_COUNT {
                self.halt_petal(petal, sink);
            }
            CmdStatus::Success
        };
        self.finish_host(status)
    }

    /// Reconfigure the maximum position. Refused when out of range or
    /// below a petal's current position.
    pub fn set_max_position(&mut self, value: u32, sink: &mut impl EventSink) -> CmdStatus {
        let in_range = value >= 1 && value <= self.max_position_ceiling;
        let below_a_petal = self.petals.iter().any(|p| p.position() > value);
        let status = if in_range && !below_a_petal {
            self.max_position = value;
            info!("max position set to {value}");
            sink.emit(&AppEvent::MaxPositionChanged { value });
            CmdStatus::Success
        } else {
            CmdStatus::Limit
        };
        self.finish_host(status)
    }

    pub fn max_position(&self) -> u32 {
        self.max_position
    }

    // ── Queries ───────────────────────────────────────────────

    /// Position of one petal in steps from home.
    pub fn position(&self, petal: usize) -> Option<u32> {
        self.petals.get(petal).map(PetalMotion::position)
    }

    /// Signed direction of one petal: +1 opening, -1 closing, 0 idle.
    pub fn direction(&self, petal: usize) -> Option<i8> {
        self.petals.get(petal).map(PetalMotion::direction)
    }

    /// Whether one petal is currently moving.
    pub fn moving(&self, petal: usize) -> Option<bool> {
        self.petals.get(petal).map(PetalMotion::moving)
    }

    /// Effective home-limit value of one petal (fake when test mode is on).
    pub fn limit_switch(&self, petal: usize) -> Option<bool> {
        if petal >= PETAL_COUNT {
            return None;
        }
        Some(self.limit_closed_effective(petal))
    }

    /// Outcome of the most recent host command.
    pub fn last_status(&self) -> CmdStatus {
        self.last_status
    }

    /// Current process mode.
    pub fn mode(&self) -> Mode {
        self.switches.mode()
    }

    /// Total input cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn drive_enabled(&self) -> bool {
        self.switches.drive_enabled()
    }

    fn any_moving(&self) -> bool {
        self.petals.iter().any(PetalMotion::moving)
    }

    // ── Test-support surface ──────────────────────────────────

    /// Switch synthetic limit readings on or off. Entering test mode seeds
    /// the fake values from the current debounced ones so motion state is
    /// not corrupted by the flip.
    pub fn set_test_mode(&mut self, on: bool) {
        if on && !self.test_mode {
            for petal in 0..PETAL_COUNT {
                self.fake_limits[petal] = self.switches.limit_closed(petal);
            }
            warn!("test mode ON, limit switches are synthetic");
        } else if !on && self.test_mode {
            warn!("test mode OFF");
        }
        self.test_mode = on;
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    /// Inject a synthetic limit reading, bypassing the debounce source.
    pub fn set_fake_switch(&mut self, petal: usize, closed: bool) -> CmdStatus {
        if petal >= PETAL_COUNT {
            return CmdStatus::WrongId;
        }
        self.fake_limits[petal] = closed;
        CmdStatus::Success
    }

    // ── Internal ──────────────────────────────────────────────

    /// Common host-path rejections: bad id, manual mode, unpowered stage.
    /// `None` means the command may proceed to the motion layer.
    fn host_motion_guard(&self, petal: usize) -> Option<CmdStatus> {
        if petal >= PETAL_COUNT {
            Some(CmdStatus::WrongId)
        } else if self.switches.mode() == Mode::Manual {
            Some(CmdStatus::Manual)
        } else if !self.switches.drive_enabled() {
            Some(CmdStatus::Disabled)
        } else {
            None
        }
    }

    fn finish_host(&mut self, status: CmdStatus) -> CmdStatus {
        self.last_status = status;
        status
    }

    /// Stop one petal if it is moving, emitting the hold position.
    fn halt_petal(&mut self, petal: usize, sink: &mut impl EventSink) {
        if self.petals[petal].moving() {
            self.petals[petal].stop();
            sink.emit(&AppEvent::MotionStopped {
                petal,
                position: self.petals[petal].position(),
            });
        }
    }

    fn limit_closed_effective(&self, petal: usize) -> bool {
        if self.test_mode {
            self.fake_limits[petal]
        } else {
            self.switches.limit_closed(petal)
        }
    }

    /// Act on the supervisor's decision for this cycle.
    fn dispatch(
        &mut self,
        action: Action,
        hw: &mut impl MotorPort,
        sink: &mut impl EventSink,
    ) {
        match action {
            Action::Stop => {
                for petal in 0..PETAL_COUNT {
                    self.halt_petal(petal, sink);
                }
            }
            Action::SetManual => sink.emit(&AppEvent::ModeChanged { mode: Mode::Manual }),
            Action::SetAutomatic => sink.emit(&AppEvent::ModeChanged {
                mode: Mode::Automatic,
            }),
            Action::StartOpen { petal } => self.panel_open(petal, hw, sink),
            Action::StartClose { petal } => self.panel_close(petal, hw, sink),
        }
    }

    /// Panel-originated open: bypasses the Manual-mode guard, keeps the
    /// power-stage and end-stop checks.
    fn panel_open(&mut self, petal: usize, hw: &mut impl MotorPort, sink: &mut impl EventSink) {
        let status = if !self.switches.drive_enabled() {
            CmdStatus::Disabled
        } else {
            self.petals[petal].open(self.max_position)
        };
        if status.accepted() {
            hw.set_direction(petal, true);
            sink.emit(&AppEvent::MotionStarted { petal, opening: true });
            if self.switches.magnet_energized(petal) {
                sink.emit(&AppEvent::MagnetPulsed { petal });
            }
        } else {
            warn!("panel open petal {petal} refused: {status}");
            sink.emit(&AppEvent::CommandRejected { petal, status });
        }
    }

    fn panel_close(&mut self, petal: usize, hw: &mut impl MotorPort, sink: &mut impl EventSink) {
        let status = if !self.switches.drive_enabled() {
            CmdStatus::Disabled
        } else {
            let limit_closed = self.limit_closed_effective(petal);
            self.petals[petal].close(limit_closed)
        };
        if status.accepted() {
            hw.set_direction(petal, false);
            sink.emit(&AppEvent::MotionStarted { petal, opening: false });
        } else {
            warn!("panel close petal {petal} refused: {status}");
            sink.emit(&AppEvent::CommandRejected { petal, status });
        }
    }
}
