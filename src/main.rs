//! Petal cap firmware — main entry point.
//!
//! Hexagonal architecture around a fixed-period polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            LogEventSink      MonotonicClock   │
//! │  (Input+Motor+Magnet)       (EventSink)       (TimePort)       │
//! │  UartConsole → ProtoEngine                                     │
//! │  (Transport)   (host commands)                                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Switches supervisor · PetalMotion × 4                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every loop iteration: tick the service (sample + arbitrate), advance
//! each petal one step at most, serve the console, feed the watchdog,
//! then sleep one motor half-period.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod app;
pub mod config;
pub mod error;
pub mod motion;
pub mod proto;
pub mod switches;

mod pins;

pub mod adapters;
pub mod drivers;

/// Petals on the cap. Petal ids run 0..PETAL_COUNT everywhere.
pub const PETAL_COUNT: usize = 4;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::MonotonicClock;
use app::ports::TimePort;
use app::service::AppService;
use config::SystemConfig;
use drivers::magnet::MagnetDriver;
use drivers::motor::MotorDriver;
use drivers::uart::UartConsole;
use drivers::watchdog::Watchdog;
use proto::engine::ProtoEngine;

/// Host link baud rate. Legacy control software drives it at 9600.
const CONSOLE_BAUD: u32 = 9600;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  petalcap v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {e} — halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new();

    // The panel keeps working without a host link, so a dead console
    // degrades rather than halts.
    let mut console = match UartConsole::install(CONSOLE_BAUD) {
        Ok(console) => Some(console),
        Err(e) => {
            warn!("console unavailable ({e}), panel-only operation");
            None
        }
    };

    // ── 3. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(MotorDriver::new(), MagnetDriver::new());
    let mut log_sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 4. Construct app service ──────────────────────────────
    let mut app = AppService::new(&config);
    app.start(&mut log_sink);
    let mut engine = ProtoEngine::new();

    info!("System ready. Entering polling loop.");

    // ── 5. Polling loop ───────────────────────────────────────
    let step_delay_ms = config.motor_half_period_ms;

    loop {
        let now_ms = clock.now_ms();
        app.tick(&mut hw, now_ms, &mut log_sink);

        // One step per petal per iteration at most; the loop period sets
        // the step rate.
        for petal in 0..PETAL_COUNT {
            app.motor_control(petal, &mut hw, &mut log_sink);
        }

        if let Some(console) = console.as_mut() {
            engine.poll(console, &mut app, &mut hw, &mut log_sink);
        }

        watchdog.feed();

        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(step_delay_ms as u32);

        // Simulation fallback so the binary stays runnable on the host.
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(step_delay_ms));
    }
}
