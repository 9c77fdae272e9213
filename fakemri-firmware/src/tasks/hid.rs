//! HID report task
//!
//! Drains the key action channel and writes one boot keyboard report
//! per action, so a press and release queued back to back still reach
//! the host as two reports.

use core::sync::atomic::Ordering;

use defmt::*;

use crate::channels::{HID_CHANNEL, USB_EPOCH};
use crate::usb::{HeldKeys, KeyboardWriter};

#[embassy_executor::task]
pub async fn hid_task(mut writer: KeyboardWriter) {
    info!("HID task started");

    let mut held = HeldKeys::default();
    let mut epoch = USB_EPOCH.load(Ordering::Relaxed);

    loop {
        writer.ready().await;

        let action = HID_CHANNEL.receive().await;

        // The host dropped everything it held when the link went down
        let current = USB_EPOCH.load(Ordering::Relaxed);
        if current != epoch {
            debug!("USB link dropped, clearing held keys");
            held.clear();
            epoch = current;
        }

        if !held.apply(action) {
            warn!("Rollover full, dropping {:?}", action);
            continue;
        }

        if let Err(e) = writer.write_serialize(&held.report()).await {
            // Host went away; start from an empty report next time
            warn!("HID write failed: {:?}", e);
            held.clear();
        }
    }
}
