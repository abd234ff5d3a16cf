//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod magnet;
pub mod motor;
pub mod uart;
pub mod watchdog;
