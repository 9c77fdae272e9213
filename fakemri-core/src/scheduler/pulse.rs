//! Drift-free pulse schedule
//!
//! Pulses are placed on a fixed grid anchored at the moment scanning
//! started. Each fire advances the grid by exactly one step, never by
//! the time that actually elapsed, so a late loop iteration delays one
//! pulse without shifting the ones after it.
//!
//! The step is shortened by a latency budget: a key event issued now
//! reaches the host up to one HID polling slot later, so the pulse is
//! issued that much early.

use crate::config::Configuration;

/// Pulse schedule anchored at the last scan start
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseSchedule {
    /// Timestamp (ns) of the last scan start/stop; None before the first one
    origin_ns: Option<u64>,
    /// Offset (ns from origin) of the last scheduled pulse
    last_transition_ns: u64,
    latency_budget_ns: u64,
}

impl PulseSchedule {
    pub const fn new(latency_budget_ns: u64) -> Self {
        Self {
            origin_ns: None,
            last_transition_ns: 0,
            latency_budget_ns,
        }
    }

    /// Re-anchor the grid at `now_ns`
    ///
    /// Called whenever scanning is started or stopped.
    pub fn restart(&mut self, now_ns: u64) {
        self.origin_ns = Some(now_ns);
        self.last_transition_ns = 0;
    }

    /// Has the schedule been anchored at least once?
    pub fn has_origin(&self) -> bool {
        self.origin_ns.is_some()
    }

    /// Distance between pulses for the configured interval
    pub fn step_ns(&self, config: &Configuration) -> u64 {
        config
            .tr_interval
            .as_nanos()
            .saturating_sub(self.latency_budget_ns)
    }

    /// Absolute offset from the origin at which the next pulse is due
    pub fn next_due_ns(&self, config: &Configuration) -> u64 {
        self.last_transition_ns + self.step_ns(config)
    }

    /// Is a pulse due at `now_ns`?
    ///
    /// Always false while not scanning or before the first scan start.
    pub fn should_fire(&self, now_ns: u64, config: &Configuration) -> bool {
        if !config.is_scanning {
            return false;
        }
        match self.origin_ns {
            Some(origin) => now_ns.saturating_sub(origin) >= self.next_due_ns(config),
            None => false,
        }
    }

    /// Move the grid forward by exactly one step
    pub fn advance(&mut self, config: &Configuration) {
        self.last_transition_ns += self.step_ns(config);
    }

    /// Offset of the last scheduled pulse from the origin
    pub fn last_transition_ns(&self) -> u64 {
        self.last_transition_ns
    }
}
