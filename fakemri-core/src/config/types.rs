//! Configuration type definitions
//!
//! The runtime configuration is volatile: it starts from the defaults on
//! every power-up and is only changed through the menu.

/// Number of physical response keys
pub const KEY_COUNT: usize = 4;

/// Keycodes per layout (four response keys plus the trigger)
pub const LAYOUT_LEN: usize = KEY_COUNT + 1;

/// Default TR interval in tenths of a second (2.0 s)
pub const DEFAULT_TR_TENTHS: u8 = 20;

/// Nanoseconds per tenth of a second
const NS_PER_TENTH: u64 = 100_000_000;

/// HID keyboard usage ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const B: KeyCode = KeyCode(0x05);
    pub const G: KeyCode = KeyCode(0x0A);
    pub const R: KeyCode = KeyCode(0x15);
    pub const T: KeyCode = KeyCode(0x17);
    pub const Y: KeyCode = KeyCode(0x1C);
    pub const ONE: KeyCode = KeyCode(0x1E);
    pub const TWO: KeyCode = KeyCode(0x1F);
    pub const THREE: KeyCode = KeyCode(0x20);
    pub const FOUR: KeyCode = KeyCode(0x21);
    pub const FIVE: KeyCode = KeyCode(0x22);

    /// Raw usage ID for the HID report
    pub const fn usage(self) -> u8 {
        self.0
    }
}

/// A fixed key layout: one keycode per response key, then the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    keys: [KeyCode; LAYOUT_LEN],
}

/// Blue/yellow/red/green response box letters, `T` for the trigger
pub static LETTER_LAYOUT: Layout = Layout {
    keys: [KeyCode::B, KeyCode::Y, KeyCode::R, KeyCode::G, KeyCode::T],
};

/// Numeric layout; slots 2 and 3 are deliberately `4` then `3`
pub static NUMERIC_LAYOUT: Layout = Layout {
    keys: [
        KeyCode::ONE,
        KeyCode::TWO,
        KeyCode::FOUR,
        KeyCode::THREE,
        KeyCode::FIVE,
    ],
};

impl Layout {
    /// Keycode for a response key slot
    ///
    /// Panics if `slot` is not a response key; the trigger is only
    /// reachable through [`Layout::trigger`].
    pub fn key(&self, slot: usize) -> KeyCode {
        self.keys[..KEY_COUNT][slot]
    }

    /// Keycode of the synthetic scanner trigger
    pub fn trigger(&self) -> KeyCode {
        self.keys[KEY_COUNT]
    }
}

/// TR interval, stored in tenths of a second
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval(u8);

impl Default for Interval {
    fn default() -> Self {
        Interval(DEFAULT_TR_TENTHS)
    }
}

impl Interval {
    /// Build from tenths of a second
    pub const fn from_tenths(tenths: u8) -> Self {
        Interval(tenths)
    }

    /// Interval for a menu offset from the default: `2.0 + 0.1 * offset`
    pub fn from_offset(offset: i8) -> Self {
        let tenths = (DEFAULT_TR_TENTHS as i16 + offset as i16).max(0) as u8;
        Interval(tenths)
    }

    pub const fn as_tenths(self) -> u8 {
        self.0
    }

    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32 / 10.0
    }

    pub const fn as_nanos(self) -> u64 {
        self.0 as u64 * NS_PER_TENTH
    }
}

/// Key behavior mode: combination of NAR and numeric layout
///
/// Variant order matches the mode submenu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Letters,
    Numbers,
    NarLetters,
    NarNumbers,
}

impl Mode {
    /// All modes in menu order
    pub const ALL: [Mode; 4] = [
        Mode::Letters,
        Mode::Numbers,
        Mode::NarLetters,
        Mode::NarNumbers,
    ];

    /// Mode for a submenu position (clamped to the last mode)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn from_flags(auto_repeat_suppressed: bool, numeric_layout: bool) -> Self {
        match (auto_repeat_suppressed, numeric_layout) {
            (false, false) => Mode::Letters,
            (false, true) => Mode::Numbers,
            (true, false) => Mode::NarLetters,
            (true, true) => Mode::NarNumbers,
        }
    }

    /// (auto-repeat suppressed, numeric layout)
    pub fn flags(self) -> (bool, bool) {
        match self {
            Mode::Letters => (false, false),
            Mode::Numbers => (false, true),
            Mode::NarLetters => (true, false),
            Mode::NarNumbers => (true, true),
        }
    }

    /// Short label shown on the display
    pub fn label(self) -> &'static str {
        match self {
            Mode::Letters => "BYRGT",
            Mode::Numbers => "12345",
            Mode::NarLetters => "NAR B",
            Mode::NarNumbers => "NAR 1",
        }
    }
}

/// Runtime configuration
///
/// Only the menu writes this. The active layout is derived from
/// `numeric_layout` and is never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Trigger pulse interval
    pub tr_interval: Interval,
    /// NAR: hold keys until physical release instead of tapping them
    pub auto_repeat_suppressed: bool,
    /// Use the numeric layout instead of letters
    pub numeric_layout: bool,
    /// Trigger pulses are being emitted
    pub is_scanning: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tr_interval: Interval::default(),
            auto_repeat_suppressed: false,
            numeric_layout: false,
            is_scanning: false,
        }
    }
}

impl Configuration {
    /// Restore every field to its power-up default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn active_layout(&self) -> &'static Layout {
        if self.numeric_layout {
            &NUMERIC_LAYOUT
        } else {
            &LETTER_LAYOUT
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::from_flags(self.auto_repeat_suppressed, self.numeric_layout)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        let (nar, numeric) = mode.flags();
        self.auto_repeat_suppressed = nar;
        self.numeric_layout = numeric;
    }
}
