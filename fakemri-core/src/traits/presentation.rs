//! Presentation sink trait

use crate::presentation::Snapshot;

/// Receives the state snapshot after each loop iteration
///
/// The sink renders labels and LED colors; it never feeds back into the
/// control loop.
pub trait PresentationSink {
    fn present(&mut self, snapshot: &Snapshot);
}
