//! Snapshot of the state shown to the user

use core::fmt::Write;

use heapless::String;

use crate::config::{Configuration, KEY_COUNT};
use crate::input::KeySlot;
use crate::menu::MenuCursor;

/// Title line (scrolls while idle)
pub const TITLE: &str = "Fake MRI";

/// Scan item label while stopped
pub const SCAN_ON_LABEL: &str = "Strt scan";

/// Scan item label while scanning
pub const SCAN_OFF_LABEL: &str = "Stop scan";

pub const RESET_LABEL: &str = "Reset";

/// 24-bit LED color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color of a held key
pub const ON_COLOR: Rgb = Rgb::new(255, 255, 255);

/// Idle color per slot: blue, yellow, red, green
pub const OFF_COLORS: [Rgb; KEY_COUNT] = [
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
];

/// Glyph drawn next to the highlighted menu row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorMarker {
    /// Moving between items
    TopLevel,
    /// Editing the item
    Submenu,
}

impl CursorMarker {
    pub fn glyph(self) -> char {
        match self {
            CursorMarker::TopLevel => '>',
            CursorMarker::Submenu => '*',
        }
    }
}

/// LED color for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicator {
    /// NeoPixel index
    pub led: u8,
    pub color: Rgb,
}

/// Display and LED state after one loop iteration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Title scrolling runs only while not scanning
    pub title_animated: bool,
    pub scan_label: &'static str,
    /// "TR: 2.0s"
    pub interval_label: String<12>,
    /// "M: BYRGT"
    pub mode_label: String<12>,
    pub reset_label: &'static str,
    /// Menu row under the cursor (0 = scan item)
    pub cursor_row: u8,
    pub cursor: CursorMarker,
    pub indicators: [Indicator; KEY_COUNT],
}

impl Snapshot {
    pub fn capture(config: &Configuration, cursor: MenuCursor, keys: &[KeySlot; KEY_COUNT]) -> Self {
        let mut interval_label = String::new();
        let tenths = config.tr_interval.as_tenths();
        // Capacity fits the longest label ("TR: 25.5s")
        let _ = write!(interval_label, "TR: {}.{}s", tenths / 10, tenths % 10);

        let mut mode_label = String::new();
        let _ = write!(mode_label, "M: {}", config.mode().label());

        Self {
            title_animated: !config.is_scanning,
            scan_label: if config.is_scanning {
                SCAN_OFF_LABEL
            } else {
                SCAN_ON_LABEL
            },
            interval_label,
            mode_label,
            reset_label: RESET_LABEL,
            cursor_row: cursor.item.index() as u8,
            cursor: if cursor.in_submenu() {
                CursorMarker::Submenu
            } else {
                CursorMarker::TopLevel
            },
            indicators: core::array::from_fn(|i| Indicator {
                led: keys[i].led,
                color: keys[i].indicator,
            }),
        }
    }
}
