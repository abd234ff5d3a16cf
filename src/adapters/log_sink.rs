//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Integration tests use a recording sink implementing the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | supervisor and petals ready");
            }
            AppEvent::ModeChanged { mode } => {
                info!("MODE | now {:?}", mode);
            }
            AppEvent::MotionStarted { petal, opening } => {
                info!(
                    "MOTION | petal={} {}",
                    petal,
                    if *opening { "opening" } else { "closing" }
                );
            }
            AppEvent::MotionStopped { petal, position } => {
                info!("MOTION | petal={} stopped at {}", petal, position);
            }
            AppEvent::OpenComplete { petal } => {
                info!("MOTION | petal={} fully open", petal);
            }
            AppEvent::CloseComplete { petal } => {
                info!("MOTION | petal={} seated on home stop", petal);
            }
            AppEvent::CommandRejected { petal, status } => {
                info!("CMD | petal={} rejected: {}", petal, status);
            }
            AppEvent::MagnetPulsed { petal } => {
                info!("MAGNET | petal={} release pulse", petal);
            }
            AppEvent::MaxPositionChanged { value } => {
                info!("CONFIG | max_position={}", value);
            }
            AppEvent::DriveLost => {
                info!("DRIVE | power stage lost");
            }
            AppEvent::DriveRestored => {
                info!("DRIVE | power stage restored");
            }
        }
    }
}
