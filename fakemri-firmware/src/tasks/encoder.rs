//! Encoder sampling task
//!
//! Samples both quadrature channels faster than the control loop so no
//! intermediate Gray-code state is missed, and publishes the absolute
//! position for the control task.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use fakemri_hal::{InputPin, PositionCounter, QuadratureCounter};

use crate::channels::ENCODER_POSITION;
use crate::config::ENCODER_POLL_US;

#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>) {
    info!("Encoder task started");

    let mut counter = QuadratureCounter::new(InputPin::is_high(&mut a), InputPin::is_high(&mut b));
    let mut ticker = Ticker::every(Duration::from_micros(ENCODER_POLL_US));

    loop {
        ticker.next().await;

        let delta = counter.update(InputPin::is_high(&mut a), InputPin::is_high(&mut b));
        if delta != 0 {
            let position = counter.position();
            trace!("Encoder position {}", position);
            ENCODER_POSITION.store(position, Ordering::Relaxed);
        }
    }
}
