//! Console line codec.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────┬─────┐
//! │ ASCII command (N B)  │ ':' │
//! └──────────────────────┴─────┘
//! ```
//!
//! The decoder accumulates incoming bytes until the `:` terminator and
//! yields the command text. CR and LF act as frame separators: they
//! reset the accumulator, so stale line noise ahead of a command never
//! bleeds into it. Overlong input flips the decoder into a discard
//! state until the next terminator, so garbage cannot wedge it.

/// Maximum command length in bytes (protects against memory exhaustion).
const MAX_LINE: usize = 32;

/// Decoder state machine.
enum DecoderState {
    /// Collecting command bytes.
    Accumulating,
    /// Buffer overflowed; dropping bytes until the frame ends.
    Discarding,
}

/// Streaming line decoder.
pub struct LineDecoder {
    state: DecoderState,
    buf: heapless::Vec<u8, MAX_LINE>,
    complete: bool,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Accumulating,
            buf: heapless::Vec::new(),
            complete: false,
        }
    }

    /// Feed one byte into the decoder.
    ///
    /// Returns `Some(&[u8])` when a terminator completes a frame. The
    /// returned slice is valid until the next call to `push`.
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        if self.complete {
            self.buf.clear();
            self.complete = false;
        }

        match byte {
            b':' => match self.state {
                DecoderState::Accumulating => {
                    self.complete = true;
                    Some(&self.buf)
                }
                DecoderState::Discarding => {
                    self.state = DecoderState::Accumulating;
                    self.buf.clear();
                    None
                }
            },
            b'\r' | b'\n' => {
                self.state = DecoderState::Accumulating;
                self.buf.clear();
                None
            }
            _ => {
                if matches!(self.state, DecoderState::Accumulating)
                    && self.buf.push(byte).is_err()
                {
                    self.state = DecoderState::Discarding;
                    self.buf.clear();
                }
                None
            }
        }
    }

    /// Reset decoder state (e.g. after a transport reconnect).
    pub fn reset(&mut self) {
        self.state = DecoderState::Accumulating;
        self.buf.clear();
        self.complete = false;
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}
