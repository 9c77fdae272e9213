//! Presentation task
//!
//! The display renderer and the NeoPixel driver are outside this
//! firmware; this task is the hand-off point and logs every change.

use defmt::*;

use fakemri_core::presentation::{Snapshot, TITLE};
use fakemri_core::traits::PresentationSink;

use crate::channels::SNAPSHOT;

/// Sink that forwards changed snapshots to the presentation task
#[derive(Default)]
pub struct SignalSink {
    last: Option<Snapshot>,
}

impl PresentationSink for SignalSink {
    fn present(&mut self, snapshot: &Snapshot) {
        if self.last.as_ref() == Some(snapshot) {
            return;
        }
        self.last = Some(snapshot.clone());
        SNAPSHOT.signal(snapshot.clone());
    }
}

/// Sink that writes the state to the defmt log
struct LogSink;

impl PresentationSink for LogSink {
    fn present(&mut self, snapshot: &Snapshot) {
        info!(
            "{} | {} | {} | {} | {} | {}{}",
            TITLE,
            snapshot.scan_label,
            snapshot.interval_label.as_str(),
            snapshot.mode_label.as_str(),
            snapshot.reset_label,
            snapshot.cursor.glyph(),
            snapshot.cursor_row,
        );
        for indicator in &snapshot.indicators {
            debug!(
                "LED {} = ({}, {}, {})",
                indicator.led, indicator.color.r, indicator.color.g, indicator.color.b
            );
        }
    }
}

#[embassy_executor::task]
pub async fn presentation_task() {
    info!("Presentation task started");

    let mut sink = LogSink;
    loop {
        let snapshot = SNAPSHOT.wait().await;
        sink.present(&snapshot);
    }
}
