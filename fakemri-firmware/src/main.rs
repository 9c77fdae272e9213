//! Fake MRI - Scanner Response Box Firmware
//!
//! Main firmware binary for the Adafruit MacroPad RP2040. Four keys act
//! as response box buttons, the encoder drives a small menu and, while
//! scanning, a trigger keystroke is sent every TR.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use {defmt_rtt as _, panic_probe as _};

use fakemri_hal::ActiveLow;

mod channels;
mod config;
mod tasks;
mod usb;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Fake MRI firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // MacroPad keys are numbered 1-12 on GPIO1-12; the response box
    // uses KEY12, KEY9, KEY3 and KEY6 in that slot order
    let pins = tasks::ControlPins {
        keys: [
            ActiveLow::new(Input::new(p.PIN_12, Pull::Up)),
            ActiveLow::new(Input::new(p.PIN_9, Pull::Up)),
            ActiveLow::new(Input::new(p.PIN_3, Pull::Up)),
            ActiveLow::new(Input::new(p.PIN_6, Pull::Up)),
        ],
        button: ActiveLow::new(Input::new(p.PIN_0, Pull::Up)),
    };

    let encoder_a = Input::new(p.PIN_17, Pull::Up);
    let encoder_b = Input::new(p.PIN_18, Pull::Up);
    info!("GPIO initialized");

    let driver = Driver::new(p.USB, Irqs);
    let (device, writer) = usb::build(driver);
    info!("USB HID keyboard initialized");

    // Spawn tasks
    spawner.spawn(tasks::usb_task(device)).unwrap();
    spawner.spawn(tasks::hid_task(writer)).unwrap();
    spawner.spawn(tasks::encoder_task(encoder_a, encoder_b)).unwrap();
    spawner.spawn(tasks::presentation_task()).unwrap();
    spawner.spawn(tasks::control_task(pins)).unwrap();

    info!("All tasks spawned, firmware running");
}
