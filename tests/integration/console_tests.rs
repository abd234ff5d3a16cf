//! Console-protocol integration: host byte stream in, reply lines out,
//! against the real service and the mock hardware.

use crate::mock_hw::{ConsolePipe, MockHardware, RecordingSink};

use petalcap::PETAL_COUNT;
use petalcap::app::service::AppService;
use petalcap::config::SystemConfig;
use petalcap::proto::engine::ProtoEngine;

// ── Harness ───────────────────────────────────────────────────

struct Console {
    app: AppService,
    engine: ProtoEngine,
    pipe: ConsolePipe,
    hw: MockHardware,
    sink: RecordingSink,
    now_ms: u64,
}

impl Console {
    fn new() -> Self {
        let config = SystemConfig::default();
        let mut app = AppService::new(&config);
        let mut sink = RecordingSink::new();
        app.start(&mut sink);
        Self {
            app,
            engine: ProtoEngine::new(),
            pipe: ConsolePipe::new(),
            hw: MockHardware::new(),
            sink,
            now_ms: 0,
        }
    }

    /// Send host bytes, poll once, and collect the replies produced.
    fn send(&mut self, bytes: &str) -> Vec<String> {
        self.pipe.send(bytes);
        self.engine
            .poll(&mut self.pipe, &mut self.app, &mut self.hw, &mut self.sink);
        self.pipe.take_replies()
    }

    /// Run `iterations` main-loop cycles between console exchanges.
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

// ── Tests ─────────────────────────────────────────────────────

#[test]
fn full_open_cycle_over_the_wire() {
    let mut con = Console::new();
    assert_eq!(con.send("i30:"), vec!["30"]);
    assert_eq!(con.send("a2:"), vec!["Ok"]);

    con.hw.input.limits[2] = true;
    con.spin(40);

    assert_eq!(con.send("p2:"), vec!["30"]);
    assert_eq!(con.send("m2:"), vec!["0"]);
    assert_eq!(con.send("f2:"), vec!["1"]);
    // moving, direction, position, limit, mode, served count.
    assert_eq!(con.send("d2:"), vec!["0,0,30,1,A,6"]);
}

#[test]
fn stop_over_the_wire_holds_position() {
    let mut con = Console::new();
    assert_eq!(con.send("i100:"), vec!["100"]);
    assert_eq!(con.send("a1:"), vec!["Ok"]);
    con.spin(15);

    assert_eq!(con.send("s1:"), vec!["Ok"]);
    assert_eq!(con.send("p1:"), vec!["15"]);
    assert_eq!(con.send("m1:"), vec!["0"]);
    // Stopping an idle petal still succeeds.
    assert_eq!(con.send("s1:"), vec!["Ok"]);
}

#[test]
fn manual_mode_refusals_over_the_wire() {
    let mut con = Console::new();
    con.hw.input.mode_manual = true;
    con.spin(30);

    assert_eq!(con.send("a0:"), vec!["E03"]);
    assert_eq!(con.send("c0:"), vec!["E03"]);
    assert_eq!(con.send("s0:"), vec!["E03"]);
    assert_eq!(con.send("S:"), vec!["E03"]);

    // Queries keep answering.
    assert_eq!(con.send("p0:"), vec!["0"]);
    let debug = con.send("d0:");
    assert!(debug[0].contains(",M,"), "debug must show manual mode: {}", debug[0]);
}

#[test]
fn wrong_petal_index_is_e01_everywhere() {
    let mut con = Console::new();
    for cmd in ["f7:", "p9:", "m4:", "d4:", "a4:", "c4:", "s9:"] {
        assert_eq!(con.send(cmd), vec!["E01"], "command {cmd}");
    }
}

#[test]
fn frames_split_across_chunks_and_line_noise() {
    let mut con = Console::new();
    // Terminator arrives in a later chunk; nothing is answered early.
    assert!(con.send("p0").is_empty());
    assert_eq!(con.send(":m0:"), vec!["0", "0"]);

    // Line endings clear partial garbage without a reply.
    let replies = con.send("garbage\r\nv:");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("petalcap v"));
}
