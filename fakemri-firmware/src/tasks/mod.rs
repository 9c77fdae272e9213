//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod control;
pub mod encoder;
pub mod hid;
pub mod presentation;
pub mod usb;

pub use control::{control_task, ControlPins};
pub use encoder::encoder_task;
pub use hid::hid_task;
pub use presentation::presentation_task;
pub use usb::usb_task;
