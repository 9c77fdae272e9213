//! Inter-task communication channels
//!
//! Static embassy-sync primitives shared between tasks. The control task
//! is the only producer for the HID channel and the snapshot signal.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicI32, AtomicU32};

use fakemri_core::presentation::Snapshot;

/// Channel capacity for key actions
///
/// One iteration can emit at most a trigger tap plus a press and a
/// release per key.
const HID_CHANNEL_SIZE: usize = 16;

/// A single key event for the HID report task
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum KeyAction {
    /// Add a usage ID to the report
    Press(u8),
    /// Remove a usage ID from the report
    Release(u8),
}

/// Key events from the control loop, in emission order
pub static HID_CHANNEL: Channel<CriticalSectionRawMutex, KeyAction, HID_CHANNEL_SIZE> =
    Channel::new();

/// Latest presentation snapshot (only sent when it changed)
pub static SNAPSHOT: Signal<CriticalSectionRawMutex, Snapshot> = Signal::new();

/// Absolute encoder position (updated by the encoder task)
pub static ENCODER_POSITION: AtomicI32 = AtomicI32::new(0);

/// Set while the host has the USB device configured and awake
pub static USB_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Bumped each time the USB link goes down
pub static USB_EPOCH: AtomicU32 = AtomicU32::new(0);
