//! Timing and debounce tuning
//!
//! These values are fixed for a build (the firmware generates them from
//! `pad.toml`); the defaults match a 1 ms control loop.

/// Worst-case delay between issuing a HID event and it reaching the host
/// (one full-speed interrupt polling slot)
pub const DEFAULT_LATENCY_BUDGET_NS: u64 = 125_000;

/// Consecutive samples a key must hold a new level before it counts
pub const DEFAULT_KEY_DEBOUNCE_SAMPLES: u8 = 5;

/// Consecutive samples the encoder button must hold a new level
pub const DEFAULT_BUTTON_DEBOUNCE_SAMPLES: u8 = 10;

/// Build-time tuning for the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuning {
    /// Subtracted from every pulse step to compensate HID latency
    pub latency_budget_ns: u64,
    /// Debounce window for the response keys, in loop iterations
    pub key_debounce_samples: u8,
    /// Debounce window for the encoder push button, in loop iterations
    pub button_debounce_samples: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            latency_budget_ns: DEFAULT_LATENCY_BUDGET_NS,
            key_debounce_samples: DEFAULT_KEY_DEBOUNCE_SAMPLES,
            button_debounce_samples: DEFAULT_BUTTON_DEBOUNCE_SAMPLES,
        }
    }
}
