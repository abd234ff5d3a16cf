//! Console engine — dispatches host commands to the AppService.
//!
//! [`ProtoEngine::poll`] drains the transport, runs every completed
//! frame through [`HostCommand::parse`], executes it against the
//! service and writes the one-line reply back. Anything that fails to
//! parse is answered with `E04` and never reaches the service.
//!
//! Reply vocabulary:
//!
//! - `Ok` / query value — command accepted
//! - `E01` — wrong petal index
//! - `E02` — illegal maximum-position value
//! - `E03` — command refused (already moving, end stop, manual mode,
//!   drive unpowered)
//! - `E04` — unrecognized command

use core::fmt::Write as _;

use log::warn;

use crate::app::commands::HostCommand;
use crate::app::ports::{EventSink, MotorPort};
use crate::app::service::AppService;
use crate::error::CmdStatus;
use crate::switches::Mode;

use super::codec::LineDecoder;
use super::transport::Transport;

/// Longest reply line, terminator included.
const REPLY_MAX: usize = 64;

type Reply = heapless::String<REPLY_MAX>;

/// Serial console engine. Owns the frame decoder and the served-command
/// counter surfaced through the `d` debug query.
pub struct ProtoEngine {
    decoder: LineDecoder,
    served: u32,
}

impl ProtoEngine {
    pub fn new() -> Self {
        Self {
            decoder: LineDecoder::new(),
            served: 0,
        }
    }

    /// Commands executed since boot (malformed frames are not counted).
    pub fn served(&self) -> u32 {
        self.served
    }

    /// Drain the transport and answer every completed frame.
    pub fn poll(
        &mut self,
        transport: &mut impl Transport,
        svc: &mut AppService,
        hw: &mut impl MotorPort,
        sink: &mut impl EventSink,
    ) {
        let mut chunk = [0u8; 64];
        while transport.available() {
            let n = match transport.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) => {
                    warn!("console read failed: {err:?}");
                    self.decoder.reset();
                    return;
                }
            };

            for &byte in &chunk[..n] {
                let Some(frame) = self.decoder.push(byte) else {
                    continue;
                };
                let cmd = core::str::from_utf8(frame).ok().and_then(HostCommand::parse);
                let reply = match cmd {
                    Some(cmd) => {
                        self.served = self.served.wrapping_add(1);
                        self.serve(cmd, svc, hw, sink)
                    }
                    None => literal("E04"),
                };
                if transport.write(reply.as_bytes()).is_err() || transport.flush().is_err() {
                    warn!("console write failed");
                }
            }
        }
    }

    /// Execute one parsed command and build its reply line.
    fn serve(
        &mut self,
        cmd: HostCommand,
        svc: &mut AppService,
        hw: &mut impl MotorPort,
        sink: &mut impl EventSink,
    ) -> Reply {
        match cmd {
            HostCommand::Version => literal(concat!("petalcap v", env!("CARGO_PKG_VERSION"))),
            HostCommand::GetLimitSwitch { petal } => match svc.limit_switch(petal) {
                Some(closed) => flag(!closed),
                None => literal("E01"),
            },
            HostCommand::GetPosition { petal } => match svc.position(petal) {
                Some(position) => number(position),
                None => literal("E01"),
            },
            HostCommand::GetMoving { petal } => match svc.moving(petal) {
                Some(moving) => flag(moving),
                None => literal("E01"),
            },
            HostCommand::GetMaxPosition => number(svc.max_position()),
            HostCommand::OpenPetal { petal } => {
                status_reply(svc.open_petal(petal, hw, sink))
            }
            HostCommand::ClosePetal { petal } => {
                status_reply(svc.close_petal(petal, hw, sink))
            }
            HostCommand::StopMotor { petal } => status_reply(svc.stop_motor(petal, sink)),
            HostCommand::StopAll => status_reply(svc.stop_all(sink)),
            HostCommand::SetMaxPosition { value } => {
                match svc.set_max_position(value, sink) {
                    // The set value is echoed so the host can confirm it.
                    CmdStatus::Success => number(value),
                    _ => literal("E02"),
                }
            }
            HostCommand::DebugInfo { petal } => self.debug_info(petal, svc),
        }
    }

    /// `dN` reply: moving, direction, position, limit (1 = open), mode,
    /// served-command count.
    fn debug_info(&self, petal: usize, svc: &AppService) -> Reply {
        let (Some(moving), Some(direction), Some(position), Some(closed)) = (
            svc.moving(petal),
            svc.direction(petal),
            svc.position(petal),
            svc.limit_switch(petal),
        ) else {
            return literal("E01");
        };
        let mode = match svc.mode() {
            Mode::Automatic => 'A',
            Mode::Manual => 'M',
        };
        let mut reply = Reply::new();
        let _ = writeln!(
            reply,
            "{},{},{},{},{},{}",
            u8::from(moving),
            direction,
            position,
            u8::from(!closed),
            mode,
            self.served
        );
        reply
    }
}

impl Default for ProtoEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn literal(text: &str) -> Reply {
    let mut reply = Reply::new();
    let _ = reply.push_str(text);
    let _ = reply.push('\n');
    reply
}

fn flag(on: bool) -> Reply {
    literal(if on { "1" } else { "0" })
}

fn number(value: u32) -> Reply {
    let mut reply = Reply::new();
    let _ = writeln!(reply, "{value}");
    reply
}

fn status_reply(status: CmdStatus) -> Reply {
    literal(match status {
        CmdStatus::Success => "Ok",
        CmdStatus::WrongId => "E01",
        CmdStatus::IllCmd => "E04",
        CmdStatus::NoExe
        | CmdStatus::Limit
        | CmdStatus::Manual
        | CmdStatus::Disabled => "E03",
    })
}
