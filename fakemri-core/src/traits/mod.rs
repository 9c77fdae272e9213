//! Output boundary traits
//!
//! These traits define the interface between the control loop and the
//! outside world: the USB HID keyboard and the display/LED layer.

pub mod keyboard;
pub mod presentation;

pub use keyboard::{KeyboardOutput, OutputError};
pub use presentation::PresentationSink;
