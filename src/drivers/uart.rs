//! UART console driver — host command link.
//!
//! Serves the line protocol on UART0 (the boot console pins), installed
//! with a driver-managed RX ring buffer so polling from the main loop
//! never blocks: `read` drains whatever arrived since the last tick.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: raw `uart_*` sys calls against the real port.
//! On host/test: a silent stub (tests use an in-memory transport).

use log::info;

use crate::proto::transport::Transport;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::pins;

/// UART0, the boot console port.
#[cfg(target_os = "espidf")]
const UART_PORT: i32 = 0;

/// Driver-managed RX ring buffer (must exceed the 128-byte hardware FIFO).
#[cfg(target_os = "espidf")]
const RX_BUFFER_BYTES: i32 = 256;

/// Ticks to wait for the TX FIFO to drain on flush.
#[cfg(target_os = "espidf")]
const FLUSH_TICKS: u32 = 100;

/// Leave a pin at its current routing.
#[cfg(target_os = "espidf")]
const PIN_NO_CHANGE: i32 = -1;

// ── Error type ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartConsoleError {
    ConfigFailed(i32),
    InstallFailed(i32),
    Io(i32),
}

impl core::fmt::Display for UartConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConfigFailed(rc) => write!(f, "uart console: port config failed (rc={rc})"),
            Self::InstallFailed(rc) => write!(f, "uart console: driver install failed (rc={rc})"),
            Self::Io(rc) => write!(f, "uart console: I/O failed (rc={rc})"),
        }
    }
}

// ── Driver ────────────────────────────────────────────────────

pub struct UartConsole;

impl UartConsole {
    /// Configure and install the UART driver. Call once at boot.
    pub fn install(baud: u32) -> Result<Self, UartConsoleError> {
        #[cfg(target_os = "espidf")]
        {
            let cfg = uart_config_t {
                baud_rate: baud as i32,
                data_bits: uart_word_length_t_UART_DATA_8_BITS,
                parity: uart_parity_t_UART_PARITY_DISABLE,
                stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
                flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
                rx_flow_ctrl_thresh: 0,
                ..Default::default()
            };
            // SAFETY: UART0 is configured once at boot, before any reads.
            let rc = unsafe { uart_param_config(UART_PORT, &cfg) };
            if rc != ESP_OK {
                return Err(UartConsoleError::ConfigFailed(rc));
            }
            let rc = unsafe {
                uart_set_pin(
                    UART_PORT,
                    pins::UART_TX_GPIO,
                    pins::UART_RX_GPIO,
                    PIN_NO_CHANGE,
                    PIN_NO_CHANGE,
                )
            };
            if rc != ESP_OK {
                return Err(UartConsoleError::ConfigFailed(rc));
            }
            let rc = unsafe {
                uart_driver_install(UART_PORT, RX_BUFFER_BYTES, 0, 0, core::ptr::null_mut(), 0)
            };
            if rc != ESP_OK {
                return Err(UartConsoleError::InstallFailed(rc));
            }
            info!("uart console: UART{UART_PORT} at {baud} baud");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("uart console(sim): {baud} baud, no-op");

        Ok(Self)
    }
}

impl Transport for UartConsole {
    type Error = UartConsoleError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, UartConsoleError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: buf outlives the call; zero tick timeout never blocks.
            let n = unsafe {
                uart_read_bytes(UART_PORT, buf.as_mut_ptr().cast(), buf.len() as u32, 0)
            };
            if n < 0 {
                return Err(UartConsoleError::Io(n));
            }
            Ok(n as usize)
        }

        #[cfg(not(target_os = "espidf"))]
        {
            let _ = buf;
            Ok(0)
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, UartConsoleError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: data outlives the call; the driver copies it out.
            let n = unsafe { uart_write_bytes(UART_PORT, data.as_ptr().cast(), data.len()) };
            if n < 0 {
                return Err(UartConsoleError::Io(n));
            }
            Ok(n as usize)
        }

        #[cfg(not(target_os = "espidf"))]
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), UartConsoleError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: waits on the driver's TX done semaphore.
            let rc = unsafe { uart_wait_tx_done(UART_PORT, FLUSH_TICKS) };
            if rc != ESP_OK {
                return Err(UartConsoleError::Io(rc));
            }
        }
        Ok(())
    }

    fn available(&self) -> bool {
        #[cfg(target_os = "espidf")]
        {
            let mut pending: usize = 0;
            // SAFETY: reads the driver's RX buffer fill level.
            let rc = unsafe { uart_get_buffered_data_len(UART_PORT, &mut pending) };
            rc == ESP_OK && pending > 0
        }

        #[cfg(not(target_os = "espidf"))]
        false
    }
}
