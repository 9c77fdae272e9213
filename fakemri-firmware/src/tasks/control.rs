//! Control loop task
//!
//! Samples the raw inputs on a fixed period and runs one controller
//! iteration per sample. Nothing in here awaits between sampling and
//! publishing, so each iteration completes before the next begins.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use fakemri_core::config::KEY_COUNT;
use fakemri_core::menu::MenuAction;
use fakemri_core::{Controller, RawInputs, TickReport};
use fakemri_hal::{ActiveLow, PositionCounter};

use crate::channels::ENCODER_POSITION;
use crate::config::{self, LOOP_PERIOD_US};
use crate::tasks::presentation::SignalSink;
use crate::usb::ChannelKeyboard;

/// Switch inputs owned by the control loop
pub struct ControlPins {
    /// Response keys in logical slot order
    pub keys: [ActiveLow<Input<'static>>; KEY_COUNT],
    /// Encoder push button
    pub button: ActiveLow<Input<'static>>,
}

impl ControlPins {
    fn sample(&mut self) -> RawInputs {
        RawInputs::sample(&mut self.keys, &mut self.button, &SharedEncoder)
    }
}

/// Encoder position published by the encoder task
struct SharedEncoder;

impl PositionCounter for SharedEncoder {
    fn position(&self) -> i32 {
        ENCODER_POSITION.load(Ordering::Relaxed)
    }
}

#[embassy_executor::task]
pub async fn control_task(mut pins: ControlPins) {
    info!("Control task started");

    let tuning = config::tuning();
    info!("Tuning: {:?}", tuning);

    let mut controller = Controller::new(tuning);
    let mut keyboard = ChannelKeyboard;
    let mut sink = SignalSink::default();
    controller.publish(&mut sink);

    let mut ticker = Ticker::every(Duration::from_micros(LOOP_PERIOD_US));
    let start = Instant::now();

    loop {
        ticker.next().await;

        let now_ns = start.elapsed().as_micros() * 1_000;
        let inputs = pins.sample();
        let report = controller.tick(now_ns, &inputs, &mut keyboard);
        log_report(&report);

        controller.publish(&mut sink);
    }
}

fn log_report(report: &TickReport) {
    if let Some(offset_ns) = report.pulse_offset_ns {
        debug!("Trigger at {} ms", offset_ns / 1_000_000);
    }
    for transition in &report.transitions {
        debug!("Key {} {:?}", transition.slot, transition.edge);
    }
    match report.menu_action {
        Some(MenuAction::ScanToggled { scanning }) => info!("Scanning: {}", scanning),
        Some(action) => debug!("Menu: {:?}", action),
        None => {}
    }
    if let Some(err) = report.output_error {
        warn!("Key output failed: {:?}", err);
    }
}
