//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (panel inputs, motor drivers, magnet coils, event sinks,
//! the clock) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics, so
//! the domain core never touches hardware directly and runs unchanged under
//! the host test harness.

use crate::switches::InputSnapshot;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick to obtain every raw
/// digital input in one consistent snapshot.
pub trait InputPort {
    fn sample(&mut self) -> InputSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Motor port (driven adapter: domain → stepper drivers)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the four stepper drivers.
pub trait MotorPort {
    /// Latch the direction line for one petal (`true` = opening).
    /// Called when a motion is accepted, before the first step.
    fn set_direction(&mut self, petal: usize, opening: bool);

    /// Emit one complete step pulse for one petal.
    fn step(&mut self, petal: usize);
}

// ───────────────────────────────────────────────────────────────
// Magnet port (driven adapter: domain → release coils)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the release-magnet coils. The service syncs every
/// coil once per tick, so the pin level always mirrors the timer state.
pub trait MagnetPort {
    fn set_magnet(&mut self, petal: usize, energized: bool);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: clock → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. Injected so tests can supply a fake clock
/// instead of sampling the wall clock.
pub trait TimePort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// the trait is the seam for anything richer).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
