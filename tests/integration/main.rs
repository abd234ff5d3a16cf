//! Integration test driver for `tests/integration/`.
//!
//! Each `mod` below maps to a file that exercises a subsystem against the
//! mock hardware.  All tests run on the host (x86_64) with no real
//! hardware required.

mod console_tests;
mod mock_hw;
mod service_tests;
