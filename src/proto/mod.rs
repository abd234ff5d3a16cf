//! Host console protocol.
//!
//! Line-oriented ASCII command protocol served over the UART console.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Console Stack                          │
//! │                                                           │
//! │  ┌──────────┐   ┌───────────┐   ┌─────────────────────┐ │
//! │  │ Transport │──▶│ LineCodec │──▶│ Engine (dispatcher) │ │
//! │  │ (trait)   │   │ (':' end) │   │  → AppService       │ │
//! │  └──────────┘   └───────────┘   └─────────────────────┘ │
//! │       ▲                                   │               │
//! │       └────────────── reply line ◀────────┘               │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod codec;
pub mod engine;
pub mod transport;
