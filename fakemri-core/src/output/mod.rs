//! Keyboard output
//!
//! Turns key transitions and trigger pulses into HID key events, and
//! tracks whether the host can currently receive them.

pub mod emitter;
pub mod link;

pub use emitter::KeyEmitter;
pub use link::HostLink;
