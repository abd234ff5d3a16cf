//! Mock hardware for integration tests.
//!
//! [`MockHardware`] stands in for the whole I/O surface: tests mutate the
//! input snapshot to play the panel and read back the recorded actuator
//! state.  [`ConsolePipe`] is an in-memory serial link for the protocol
//! engine.

use petalcap::PETAL_COUNT;
use petalcap::app::events::AppEvent;
use petalcap::app::ports::{EventSink, InputPort, MagnetPort, MotorPort};
use petalcap::proto::transport::Transport;
use petalcap::switches::InputSnapshot;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Next snapshot returned by `sample`; tests mutate this directly.
    pub input: InputSnapshot,
    /// Last latched direction per petal (`true` = opening).
    pub opening: [bool; PETAL_COUNT],
    /// Step pulses emitted per petal.
    pub steps: [u32; PETAL_COUNT],
    /// Current release-coil level per petal.
    pub magnets: [bool; PETAL_COUNT],
}

impl MockHardware {
    pub fn new() -> Self {
        Self {
            input: InputSnapshot::default(),
            opening: [false; PETAL_COUNT],
            steps: [0; PETAL_COUNT],
            magnets: [false; PETAL_COUNT],
        }
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn sample(&mut self) -> InputSnapshot {
        self.input
    }
}

impl MotorPort for MockHardware {
    fn set_direction(&mut self, petal: usize, opening: bool) {
        self.opening[petal] = opening;
    }

    fn step(&mut self, petal: usize) {
        self.steps[petal] += 1;
    }
}

impl MagnetPort for MockHardware {
    fn set_magnet(&mut self, petal: usize, energized: bool) {
        self.magnets[petal] = energized;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps every emitted event for later assertions.
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── ConsolePipe ───────────────────────────────────────────────

/// In-memory serial link: the test writes host bytes into `rx` and collects
/// firmware output from `tx`.
pub struct ConsolePipe {
    rx: Vec<u8>,
    tx: Vec<u8>,
}

#[allow(dead_code)]
impl ConsolePipe {
    pub fn new() -> Self {
        Self {
            rx: Vec::new(),
            tx: Vec::new(),
        }
    }

    /// Queue host bytes for the next poll.
    pub fn send(&mut self, bytes: &str) {
        self.rx.extend_from_slice(bytes.as_bytes());
    }

    /// Drain everything the firmware wrote, split into reply lines.
    pub fn take_replies(&mut self) -> Vec<String> {
        let text = String::from_utf8(std::mem::take(&mut self.tx)).expect("replies are ASCII");
        text.lines().map(str::to_owned).collect()
    }
}

impl Default for ConsolePipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ConsolePipe {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let n = self.rx.len().min(buf.len());
        buf[..n].copy_from_slice(&self.rx[..n]);
        self.rx.drain(..n);
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}
