//! Menu items and their edit offsets

/// Top-level menu items, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    /// Start/stop trigger pulses
    #[default]
    ScanToggle,
    /// Adjust the TR interval
    IntervalEdit,
    /// Pick layout and NAR mode
    ModeEdit,
    /// Restore defaults
    Reset,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::ScanToggle,
        MenuItem::IntervalEdit,
        MenuItem::ModeEdit,
        MenuItem::Reset,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    /// Item at `index`, clamped to the list
    pub fn from_index(index: isize) -> Self {
        Self::ALL[index.clamp(0, Self::COUNT as isize - 1) as usize]
    }

    /// Move the cursor by `direction` without wrapping
    pub fn scroll(self, direction: i8) -> Self {
        Self::from_index(self.index() as isize + direction as isize)
    }
}

/// Edit accumulator clamped to `MIN..=MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundedOffset<const MIN: i8, const MAX: i8>(i8);

impl<const MIN: i8, const MAX: i8> Default for BoundedOffset<MIN, MAX> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<const MIN: i8, const MAX: i8> BoundedOffset<MIN, MAX> {
    pub const fn new(value: i8) -> Self {
        let value = if value < MIN {
            MIN
        } else if value > MAX {
            MAX
        } else {
            value
        };
        Self(value)
    }

    /// Add `direction` and clamp
    pub fn adjust(&mut self, direction: i8) {
        *self = Self::new(self.0.saturating_add(direction));
    }

    pub const fn value(self) -> i8 {
        self.0
    }
}

/// TR interval offset in 0.1 s steps from 2.0 s (0.5 s ..= 3.0 s)
pub type IntervalOffset = BoundedOffset<-15, 10>;

/// Position in the mode list
pub type ModeOffset = BoundedOffset<0, 3>;

/// An open submenu, carrying the edit state of its item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edit {
    ScanToggle,
    Interval(IntervalOffset),
    Mode(ModeOffset),
    Reset,
}

impl Edit {
    /// Fresh submenu for `item`; the offset always starts at zero
    pub fn open(item: MenuItem) -> Self {
        match item {
            MenuItem::ScanToggle => Edit::ScanToggle,
            MenuItem::IntervalEdit => Edit::Interval(IntervalOffset::default()),
            MenuItem::ModeEdit => Edit::Mode(ModeOffset::default()),
            MenuItem::Reset => Edit::Reset,
        }
    }

    /// Current offset (0 for one-shot items)
    pub fn offset(&self) -> i8 {
        match self {
            Edit::Interval(offset) => offset.value(),
            Edit::Mode(offset) => offset.value(),
            Edit::ScanToggle | Edit::Reset => 0,
        }
    }
}
