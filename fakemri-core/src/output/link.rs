//! Host link state
//!
//! Folds USB device events into "can the host take key reports right
//! now". Suspend does not forget the configuration: a resumed device is
//! usable again without the host re-enumerating it.

/// USB device state as seen by the keyboard output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostLink {
    configured: bool,
    suspended: bool,
    epoch: u32,
}

impl HostLink {
    pub const fn new() -> Self {
        Self {
            configured: false,
            suspended: false,
            epoch: 0,
        }
    }

    /// Bus reset or device disabled: configuration is gone
    pub fn reset(&mut self) {
        self.update(false, false);
    }

    pub fn enabled(&mut self, enabled: bool) {
        if !enabled {
            self.reset();
        }
    }

    pub fn configured(&mut self, configured: bool) {
        self.update(configured, self.suspended);
    }

    pub fn suspended(&mut self, suspended: bool) {
        self.update(self.configured, suspended);
    }

    /// True when key reports can reach the host
    pub fn is_ready(&self) -> bool {
        self.configured && !self.suspended
    }

    /// Bumped every time the link stops being ready
    ///
    /// Whatever the host had held before a bump is gone on its side.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    fn update(&mut self, configured: bool, suspended: bool) {
        let was_ready = self.is_ready();
        self.configured = configured;
        self.suspended = suspended;
        if was_ready && !self.is_ready() {
            self.epoch = self.epoch.wrapping_add(1);
        }
    }
}
