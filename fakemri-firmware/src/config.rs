//! Build-time tuning
//!
//! Constants generated by build.rs from `pad.toml`.

use fakemri_core::config::Tuning;

include!(concat!(env!("OUT_DIR"), "/tuning.rs"));

/// Control loop tuning for the core
pub fn tuning() -> Tuning {
    Tuning {
        latency_budget_ns: LATENCY_BUDGET_NS,
        key_debounce_samples: KEY_DEBOUNCE_SAMPLES,
        button_debounce_samples: BUTTON_DEBOUNCE_SAMPLES,
    }
}
