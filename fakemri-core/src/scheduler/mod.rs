//! Trigger pulse scheduling
//!
//! Decides when the next synthetic scanner trigger keystroke is due.

pub mod pulse;

pub use pulse::PulseSchedule;
