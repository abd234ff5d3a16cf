//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to              |
//! |------------|--------------------|--------------------------|
//! | `hardware` | InputPort          | ESP32 GPIO inputs        |
//! |            | MotorPort          | Stepper drivers          |
//! |            | MagnetPort         | Release coil MOSFETs     |
//! | `log_sink` | EventSink          | Serial log output        |
//! | `time`     | TimePort           | ESP32 system timer       |

pub mod hardware;
pub mod log_sink;
pub mod time;
