//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the polling loop wedges. The loop iterates
//! every motor half-period (100 ms), so a feed gap anywhere near the
//! timeout means the firmware is gone, not merely busy.
//!
//! `main()` calls [`Watchdog::feed`] once per loop iteration.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Loop-stall timeout before the TWDT panics and resets.
#[cfg(target_os = "espidf")]
const TIMEOUT_MS: u32 = 10_000;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Configure the TWDT and subscribe the current task to it.
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: single-threaded boot path; TWDT API is main-task only.
            let subscribed = unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms: TIMEOUT_MS,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    log::warn!("watchdog: reconfigure returned {ret}, keeping existing config");
                }
                esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK
            };
            if subscribed {
                log::info!("watchdog: armed, {TIMEOUT_MS} ms timeout");
            } else {
                log::warn!("watchdog: task subscription failed, running unguarded");
            }
            Self { subscribed }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("watchdog(sim): no-op");
            Self {}
        }
    }

    /// Pet the timer. Safe to call when the subscription failed.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: calling task was subscribed in new().
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
