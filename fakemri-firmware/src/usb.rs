//! USB HID keyboard plumbing
//!
//! The control loop never touches the USB stack directly: it pushes
//! [`KeyAction`]s into [`HID_CHANNEL`] and the HID task turns them into
//! boot keyboard reports.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use heapless::Vec;
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

use fakemri_core::config::KeyCode;
use fakemri_core::output::HostLink;
use fakemri_core::traits::{KeyboardOutput, OutputError};

use crate::channels::{KeyAction, HID_CHANNEL, USB_CONFIGURED, USB_EPOCH};
use crate::config::{USB_MANUFACTURER, USB_POLL_MS, USB_PID, USB_PRODUCT, USB_VID};

pub type UsbDriver = Driver<'static, USB>;

/// Boot keyboard report size
pub const REPORT_SIZE: usize = 8;

pub type KeyboardWriter = HidWriter<'static, UsbDriver, REPORT_SIZE>;

static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 0]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static HID_STATE: StaticCell<State<'static>> = StaticCell::new();
static DEVICE_HANDLER: StaticCell<DeviceHandler> = StaticCell::new();

/// Mirrors USB device events into the shared link flags
struct DeviceHandler {
    link: HostLink,
}

impl DeviceHandler {
    fn sync(&self) {
        USB_EPOCH.store(self.link.epoch(), Ordering::Relaxed);
        USB_CONFIGURED.store(self.link.is_ready(), Ordering::Relaxed);
    }
}

impl Handler for DeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        self.link.enabled(enabled);
        self.sync();
    }

    fn reset(&mut self) {
        self.link.reset();
        self.sync();
    }

    fn configured(&mut self, configured: bool) {
        self.link.configured(configured);
        self.sync();
        info!("USB configured: {}", configured);
    }

    fn suspended(&mut self, suspended: bool) {
        self.link.suspended(suspended);
        self.sync();
        debug!("USB suspended: {}, ready: {}", suspended, self.link.is_ready());
    }
}

/// Build the keyboard-only USB device
pub fn build(driver: UsbDriver) -> (UsbDevice<'static, UsbDriver>, KeyboardWriter) {
    let mut config = Config::new(USB_VID, USB_PID);
    config.manufacturer = Some(USB_MANUFACTURER);
    config.product = Some(USB_PRODUCT);
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 0]),
        CONTROL_BUF.init([0; 64]),
    );
    builder.handler(DEVICE_HANDLER.init(DeviceHandler {
        link: HostLink::new(),
    }));

    let hid_config = HidConfig {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: USB_POLL_MS,
        max_packet_size: REPORT_SIZE as u16,
    };
    let writer = HidWriter::new(&mut builder, HID_STATE.init(State::new()), hid_config);

    (builder.build(), writer)
}

/// Keyboard output that queues events for the HID task
///
/// Never blocks: a full queue drops the event and reports it.
pub struct ChannelKeyboard;

impl ChannelKeyboard {
    fn send(&mut self, action: KeyAction) -> Result<(), OutputError> {
        if !USB_CONFIGURED.load(Ordering::Relaxed) {
            return Err(OutputError::Disconnected);
        }
        HID_CHANNEL
            .try_send(action)
            .map_err(|_| OutputError::QueueFull)
    }
}

impl KeyboardOutput for ChannelKeyboard {
    fn press(&mut self, key: KeyCode) -> Result<(), OutputError> {
        self.send(KeyAction::Press(key.usage()))
    }

    fn release(&mut self, key: KeyCode) -> Result<(), OutputError> {
        self.send(KeyAction::Release(key.usage()))
    }
}

/// Set of usage IDs currently held on the host (6-key rollover)
#[derive(Default)]
pub struct HeldKeys {
    keys: Vec<u8, 6>,
}

impl HeldKeys {
    /// Apply one action; false when a press did not fit
    pub fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Press(code) => self.keys.contains(&code) || self.keys.push(code).is_ok(),
            KeyAction::Release(code) => {
                self.keys.retain(|&k| k != code);
                true
            }
        }
    }

    pub fn report(&self) -> KeyboardReport {
        let mut keycodes = [0u8; 6];
        keycodes[..self.keys.len()].copy_from_slice(&self.keys);
        KeyboardReport {
            modifier: 0,
            reserved: 0,
            leds: 0,
            keycodes,
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
