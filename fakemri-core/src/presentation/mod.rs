//! Presentation snapshot
//!
//! Everything the display and the key LEDs need, derived from the
//! control state after each loop iteration.

pub mod snapshot;

pub use snapshot::{
    CursorMarker, Indicator, Rgb, Snapshot, OFF_COLORS, ON_COLOR, RESET_LABEL, SCAN_OFF_LABEL,
    SCAN_ON_LABEL, TITLE,
};
