//! Full control-loop integration: panel inputs through the switch
//! supervisor into motion, with the host command API beside it.
//!
//! Every test drives `tick` + `motor_control` exactly the way the firmware
//! main loop does, advancing a simulated clock 10 ms per iteration.

use crate::mock_hw::{MockHardware, RecordingSink};

use petalcap::PETAL_COUNT;
use petalcap::app::events::AppEvent;
use petalcap::app::service::AppService;
use petalcap::config::SystemConfig;
use petalcap::error::CmdStatus;
use petalcap::switches::Mode;

// ── Harness ───────────────────────────────────────────────────

struct Rig {
    app: AppService,
    hw: MockHardware,
    sink: RecordingSink,
    now_ms: u64,
}

impl Rig {
    fn new() -> Self {
        let config = SystemConfig::default();
        let mut app = AppService::new(&config);
        let mut sink = RecordingSink::new();
        app.start(&mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            sink,
            now_ms: 0,
        }
    }

    /// Run `iterations` main-loop cycles at the simulated 10 ms cadence.
    fn spin(&mut self, iterations: u32) {
        for _ in 0..iterations {
            self.now_ms += 10;
            self.app.tick(&mut self.hw, self.now_ms, &mut self.sink);
            for petal in 0..PETAL_COUNT {
                self.app.motor_control(petal, &mut self.hw, &mut self.sink);
            }
        }
    }
}

// ── Host-commanded motion ─────────────────────────────────────

#[test]
fn host_open_runs_to_max_and_auto_stops() {
    let mut rig = Rig::new();
    assert_eq!(rig.app.set_max_position(30, &mut rig.sink), CmdStatus::Success);
    assert_eq!(
        rig.app.open_petal(2, &mut rig.hw, &mut rig.sink),
        CmdStatus::Success
    );
    assert!(rig.hw.opening[2]);

    // The petal leaves its home stop once motion begins.
    rig.hw.input.limits[2] = true;
    rig.spin(40);

    assert_eq!(rig.app.position(2), Some(30));
    assert_eq!(rig.app.moving(2), Some(false));
    assert_eq!(rig.hw.steps[2], 30, "exactly one pulse per position unit");
    assert!(rig.sink.contains(&AppEvent::MotionStarted { petal: 2, opening: true }));
    assert!(rig.sink.contains(&AppEvent::OpenComplete { petal: 2 }));
    assert_eq!(rig.hw.steps[0], 0, "other petals must not move");
    assert_eq!(rig.app.tick_count(), 40);
}

#[test]
fn closing_stops_on_the_home_switch_not_the_count() {
    let mut rig = Rig::new();
    rig.app.set_max_position(30, &mut rig.sink);
    rig.app.open_petal(0, &mut rig.hw, &mut rig.sink);
    rig.hw.input.limits[0] = true;
    rig.spin(40);
    assert_eq!(rig.app.position(0), Some(30));

    assert_eq!(
        rig.app.close_petal(0, &mut rig.hw, &mut rig.sink),
        CmdStatus::Success
    );
    assert!(!rig.hw.opening[0]);

    // The count reaches zero before the switch trips; the motor keeps
    // pushing and the count saturates instead of wrapping.
    rig.spin(35);
    assert_eq!(rig.app.position(0), Some(0));
    assert_eq!(rig.app.moving(0), Some(true));

    // Home stop reached: the line returns to the closed level and the
    // debounced switch ends the motion.
    rig.hw.input.limits[0] = false;
    rig.spin(30);
    assert_eq!(rig.app.moving(0), Some(false));
    assert!(rig.sink.contains(&AppEvent::CloseComplete { petal: 0 }));
}

#[test]
fn second_command_while_moving_is_refused() {
    let mut rig = Rig::new();
    rig.app.set_max_position(100, &mut rig.sink);
    assert_eq!(
        rig.app.open_petal(0, &mut rig.hw, &mut rig.sink),
        CmdStatus::Success
    );
    rig.spin(3);

    assert_eq!(
        rig.app.open_petal(0, &mut rig.hw, &mut rig.sink),
        CmdStatus::NoExe
    );
    assert_eq!(
        rig.app.close_petal(0, &mut rig.hw, &mut rig.sink),
        CmdStatus::NoExe
    );
    assert_eq!(rig.app.last_status(), CmdStatus::NoExe);

    // The in-flight motion is unaffected.
    rig.spin(3);
    assert_eq!(rig.app.moving(0), Some(true));
    assert_eq!(rig.app.position(0), Some(6));
}

#[test]
fn stop_all_halts_every_moving_petal() {
    let mut rig = Rig::new();
    rig.app.set_max_position(200, &mut rig.sink);
    for petal in 0..PETAL_COUNT {
        assert_eq!(
            rig.app.open_petal(petal, &mut rig.hw, &mut rig.sink),
            CmdStatus::Success
        );
    }
    rig.spin(10);

    assert_eq!(rig.app.stop_all(&mut rig.sink), CmdStatus::Success);
    for petal in 0..PETAL_COUNT {
        assert_eq!(rig.app.moving(petal), Some(false));
        assert_eq!(rig.app.position(petal), Some(10));
        assert!(rig.sink.contains(&AppEvent::MotionStopped { petal, position: 10 }));
    }
}

// ── Mode arbitration ──────────────────────────────────────────

#[test]
fn host_commands_refused_in_manual_mode() {
    let mut rig = Rig::new();
    rig.hw.input.mode_manual = true;
    rig.spin(30);
    assert_eq!(rig.app.mode(), Mode::Manual);
    assert!(rig.sink.contains(&AppEvent::ModeChanged { mode: Mode::Manual }));

    assert_eq!(
        rig.app.open_petal(0, &mut rig.hw, &mut rig.sink),
        CmdStatus::Manual
    );
    assert_eq!(
        rig.app.close_petal(1, &mut rig.hw, &mut rig.sink),
        CmdStatus::Manual
    );
    assert_eq!(rig.app.stop_motor(0, &mut rig.sink), CmdStatus::Manual);
    assert_eq!(rig.app.stop_all(&mut rig.sink), CmdStatus::Manual);
    assert_eq!(rig.app.last_status(), CmdStatus::Manual);

    // Queries still answer in manual mode.
    assert_eq!(rig.app.position(0), Some(0));

    // Back to automatic: host motion works again.
    rig.hw.input.mode_manual = false;
    rig.spin(30);
    assert_eq!(rig.app.mode(), Mode::Automatic);
    assert!(rig.sink.contains(&AppEvent::ModeChanged { mode: Mode::Automatic }));
    assert_eq!(
        rig.app.open_petal(0, &mut rig.hw, &mut rig.sink),
        CmdStatus::Success
    );
}

// ── Panel-commanded motion ────────────────────────────────────

#[test]
fn panel_open_selects_petal_and_pulses_magnet() {
    let mut rig = Rig::new();
    rig.app.set_max_position(50, &mut rig.sink);
    rig.hw.input.mode_manual = true;
    rig.hw.input.selector[3] = true;
    rig.spin(30);
    assert_eq!(rig.app.mode(), Mode::Manual);

    rig.hw.input.open_button = true;
    rig.spin(25);
    assert_eq!(rig.app.moving(3), Some(true));
    assert!(rig.hw.opening[3]);
    assert!(rig.hw.magnets[3], "release coil energized during the pulse");
    assert!(rig.sink.contains(&AppEvent::MotionStarted { petal: 3, opening: true }));
    assert!(rig.sink.contains(&AppEvent::MagnetPulsed { petal: 3 }));

    // The pulse dies on its own; the motion runs to completion.
    rig.spin(110);
    assert!(!rig.hw.magnets[3]);
    assert_eq!(rig.app.moving(3), Some(false));
    assert_eq!(rig.app.position(3), Some(50));
    assert!(rig.sink.contains(&AppEvent::OpenComplete { petal: 3 }));
}

#[test]
fn press_during_motion_stops_the_petal() {
    let mut rig = Rig::new();
    rig.hw.input.mode_manual = true;
    rig.hw.input.selector[1] = true;
    rig.spin(30);
    rig.hw.input.open_button = true;
    rig.spin(25);
    assert_eq!(rig.app.moving(1), Some(true));

    // Release, then press close while the petal still runs.
    rig.hw.input.open_button = false;
    rig.spin(30);
    assert_eq!(rig.app.moving(1), Some(true), "release edge is not a request");
    rig.hw.input.close_button = true;
    rig.spin(25);

    assert_eq!(rig.app.moving(1), Some(false));
    let held = rig.app.position(1).unwrap();
    assert!(held > 0, "stop holds position, not home");
    assert!(rig.sink.contains(&AppEvent::MotionStopped { petal: 1, position: held }));
}

#[test]
fn both_buttons_pressed_is_no_request() {
    let mut rig = Rig::new();
    rig.hw.input.mode_manual = true;
    rig.spin(30);

    rig.hw.input.open_button = true;
    rig.hw.input.close_button = true;
    rig.spin(40);

    for petal in 0..PETAL_COUNT {
        assert_eq!(rig.app.moving(petal), Some(false));
    }
    assert_eq!(rig.hw.steps, [0; PETAL_COUNT]);
}

#[test]
fn panel_request_with_drive_down_is_rejected() {
    let mut rig = Rig::new();
    rig.hw.input.mode_manual = true;
    rig.hw.input.drive_enabled = false;
    rig.spin(30);
    assert_eq!(rig.app.mode(), Mode::Manual);
    assert!(!rig.app.drive_enabled());

    rig.hw.input.open_button = true;
    rig.spin(25);

    assert_eq!(rig.app.moving(0), Some(false));
    assert!(!rig.hw.magnets[0], "no release pulse while the stage is down");
    assert!(rig.sink.contains(&AppEvent::CommandRejected {
        petal: 0,
        status: CmdStatus::Disabled,
    }));
}

// ── Power-stage supervision ───────────────────────────────────

#[test]
fn drive_loss_stops_motion_and_blocks_new_commands() {
    let mut rig = Rig::new();
    rig.app.set_max_position(200, &mut rig.sink);
    rig.app.open_petal(0, &mut rig.hw, &mut rig.sink);
    rig.spin(5);
    assert_eq!(rig.app.moving(0), Some(true));

    rig.hw.input.drive_enabled = false;
    rig.spin(30);
    assert_eq!(rig.app.moving(0), Some(false));
    assert!(!rig.app.drive_enabled());
    assert!(rig.sink.contains(&AppEvent::DriveLost));
    assert!(rig.app.position(0).unwrap() > 0, "position held, not reset");

    // Motion requests are refused while the stage is down.
    assert_eq!(
        rig.app.open_petal(1, &mut rig.hw, &mut rig.sink),
        CmdStatus::Disabled
    );

    rig.hw.input.drive_enabled = true;
    rig.spin(30);
    assert!(rig.app.drive_enabled());
    assert!(rig.sink.contains(&AppEvent::DriveRestored));
    assert_eq!(
        rig.app.open_petal(1, &mut rig.hw, &mut rig.sink),
        CmdStatus::Success
    );
}
