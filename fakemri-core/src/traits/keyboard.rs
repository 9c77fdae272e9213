//! Keyboard output trait for the USB HID link

use crate::config::KeyCode;

/// Errors that can occur when handing key events to the HID link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// The report queue is full; the event was dropped
    QueueFull,
    /// The host has not configured the device
    Disconnected,
}

/// Sink for keyboard key events
///
/// Implementations must deliver events to the host in call order, so a
/// press followed by a release in the same loop iteration still arrives
/// as two distinct reports.
pub trait KeyboardOutput {
    /// Send a key-down event
    fn press(&mut self, key: KeyCode) -> Result<(), OutputError>;

    /// Send a key-up event
    fn release(&mut self, key: KeyCode) -> Result<(), OutputError>;
}
