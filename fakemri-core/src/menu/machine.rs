//! Menu state machine
//!
//! Consumes the debounced button press and the encoder direction once
//! per loop iteration and edits the configuration it is handed.
//!
//! ```text
//!            press                        press
//! TopLevel ─────────> Submenu(Edit) ──────────────> TopLevel
//!    ^                     │
//!    └─────────────────────┘
//!     ScanToggle / Reset act and return immediately
//! ```
//!
//! While scanning, rotation is ignored at the top level so the cursor
//! cannot be bumped mid-session; an open submenu still takes it.

use super::items::{Edit, MenuItem};
use crate::config::{Configuration, Interval, Mode};

/// Which level of the menu has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Focus {
    #[default]
    TopLevel,
    Submenu(Edit),
}

/// Cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuCursor {
    /// Highlighted top-level item; kept while a submenu is open
    pub item: MenuItem,
    pub focus: Focus,
}

impl MenuCursor {
    pub fn in_submenu(&self) -> bool {
        matches!(self.focus, Focus::Submenu(_))
    }
}

/// Inputs for one menu step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuInput {
    /// Button press edge seen this iteration
    pub pressed: bool,
    /// Encoder direction (-1, 0, +1)
    pub direction: i8,
}

/// Configuration changes made by a menu step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Scanning was switched; the pulse schedule must be re-anchored
    ScanToggled { scanning: bool },
    IntervalChanged(Interval),
    /// Layout and/or NAR changed
    ModeChanged(Mode),
    /// Everything back to defaults
    Reset,
}

/// Two-level menu controller
#[derive(Debug, Default)]
pub struct Menu {
    cursor: MenuCursor,
}

impl Menu {
    pub const fn new() -> Self {
        Self {
            cursor: MenuCursor {
                item: MenuItem::ScanToggle,
                focus: Focus::TopLevel,
            },
        }
    }

    pub fn cursor(&self) -> MenuCursor {
        self.cursor
    }

    /// Run one menu step
    pub fn handle(&mut self, input: MenuInput, config: &mut Configuration) -> Option<MenuAction> {
        let edit = match self.cursor.focus {
            Focus::Submenu(_) if input.pressed => {
                self.cursor.focus = Focus::TopLevel;
                None
            }
            Focus::Submenu(edit) => Some(edit),
            Focus::TopLevel if input.pressed => Some(Edit::open(self.cursor.item)),
            Focus::TopLevel => None,
        };

        match edit {
            Some(edit) => self.apply(edit, input.direction, config),
            None => {
                if !config.is_scanning {
                    self.cursor.item = self.cursor.item.scroll(input.direction);
                }
                None
            }
        }
    }

    fn apply(
        &mut self,
        edit: Edit,
        direction: i8,
        config: &mut Configuration,
    ) -> Option<MenuAction> {
        match edit {
            Edit::ScanToggle => {
                config.is_scanning = !config.is_scanning;
                self.cursor.focus = Focus::TopLevel;
                Some(MenuAction::ScanToggled {
                    scanning: config.is_scanning,
                })
            }
            Edit::Interval(mut offset) => {
                offset.adjust(direction);
                self.cursor.focus = Focus::Submenu(Edit::Interval(offset));

                let interval = Interval::from_offset(offset.value());
                if interval == config.tr_interval {
                    return None;
                }
                config.tr_interval = interval;
                Some(MenuAction::IntervalChanged(interval))
            }
            Edit::Mode(mut offset) => {
                offset.adjust(direction);
                self.cursor.focus = Focus::Submenu(Edit::Mode(offset));

                let mode = Mode::from_index(offset.value() as usize);
                if mode == config.mode() {
                    return None;
                }
                config.set_mode(mode);
                Some(MenuAction::ModeChanged(mode))
            }
            Edit::Reset => {
                config.reset();
                self.cursor = MenuCursor::default();
                Some(MenuAction::Reset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::items::{IntervalOffset, ModeOffset};
    use proptest::prelude::*;

    const PRESS: MenuInput = MenuInput {
        pressed: true,
        direction: 0,
    };
    const IDLE: MenuInput = MenuInput {
        pressed: false,
        direction: 0,
    };

    fn turn(direction: i8) -> MenuInput {
        MenuInput {
            pressed: false,
            direction,
        }
    }

    fn select(menu: &mut Menu, config: &mut Configuration, item: MenuItem) {
        for _ in 0..MenuItem::COUNT {
            menu.handle(turn(-1), config);
        }
        for _ in 0..item.index() {
            menu.handle(turn(1), config);
        }
        assert_eq!(menu.cursor().item, item);
    }

    #[test]
    fn test_initial_state() {
        let menu = Menu::new();
        assert_eq!(menu.cursor().item, MenuItem::ScanToggle);
        assert_eq!(menu.cursor().focus, Focus::TopLevel);
    }

    #[test]
    fn test_top_level_scroll_clamped() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();
        menu.handle(turn(-1), &mut config);
        assert_eq!(menu.cursor().item, MenuItem::ScanToggle);
        for _ in 0..6 {
            menu.handle(turn(1), &mut config);
        }
        assert_eq!(menu.cursor().item, MenuItem::Reset);
    }

    #[test]
    fn test_scan_toggle_is_one_shot() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();

        let action = menu.handle(PRESS, &mut config);
        assert_eq!(action, Some(MenuAction::ScanToggled { scanning: true }));
        assert!(config.is_scanning);
        assert_eq!(menu.cursor().focus, Focus::TopLevel);

        let action = menu.handle(PRESS, &mut config);
        assert_eq!(action, Some(MenuAction::ScanToggled { scanning: false }));
        assert!(!config.is_scanning);
    }

    #[test]
    fn test_scroll_ignored_while_scanning() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();
        menu.handle(PRESS, &mut config);
        menu.handle(turn(1), &mut config);
        assert_eq!(menu.cursor().item, MenuItem::ScanToggle);
    }

    #[test]
    fn test_submenu_rotation_honored_while_scanning() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();
        select(&mut menu, &mut config, MenuItem::IntervalEdit);
        config.is_scanning = true;

        menu.handle(PRESS, &mut config);
        menu.handle(turn(1), &mut config);
        assert_eq!(config.tr_interval.as_tenths(), 21);
    }

    #[test]
    fn test_interval_edit_clamps_low() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();
        select(&mut menu, &mut config, MenuItem::IntervalEdit);

        menu.handle(PRESS, &mut config);
        assert!(menu.cursor().in_submenu());
        for _ in 0..15 {
            menu.handle(turn(-1), &mut config);
        }
        assert_eq!(config.tr_interval.as_secs_f32(), 0.5);

        assert_eq!(menu.handle(turn(-1), &mut config), None);
        assert_eq!(
            menu.cursor().focus,
            Focus::Submenu(Edit::Interval(IntervalOffset::new(-15)))
        );
        assert_eq!(config.tr_interval.as_tenths(), 5);
    }

    #[test]
    fn test_interval_edit_clamps_high() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();
        select(&mut menu, &mut config, MenuItem::IntervalEdit);
        menu.handle(PRESS, &mut config);
        for _ in 0..14 {
            menu.handle(turn(1), &mut config);
        }
        assert_eq!(config.tr_interval.as_tenths(), 30);
    }

    #[test]
    fn test_reopening_interval_restarts_from_default() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();
        select(&mut menu, &mut config, MenuItem::IntervalEdit);
        menu.handle(PRESS, &mut config);
        menu.handle(turn(1), &mut config);
        menu.handle(PRESS, &mut config);
        assert_eq!(config.tr_interval.as_tenths(), 21);
        assert_eq!(menu.cursor().focus, Focus::TopLevel);
        assert_eq!(menu.cursor().item, MenuItem::IntervalEdit);

        let action = menu.handle(PRESS, &mut config);
        assert_eq!(action, Some(MenuAction::IntervalChanged(Interval::from_tenths(20))));
    }

    #[test]
    fn test_mode_edit_order() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();
        select(&mut menu, &mut config, MenuItem::ModeEdit);

        menu.handle(PRESS, &mut config);
        let mut visited = [(false, false); 5];
        visited[0] = (config.auto_repeat_suppressed, config.numeric_layout);
        for slot in visited.iter_mut().skip(1) {
            menu.handle(turn(1), &mut config);
            *slot = (config.auto_repeat_suppressed, config.numeric_layout);
        }

        assert_eq!(
            visited,
            [
                (false, false),
                (false, true),
                (true, false),
                (true, true),
                (true, true),
            ]
        );
        assert_eq!(
            menu.cursor().focus,
            Focus::Submenu(Edit::Mode(ModeOffset::new(3)))
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut menu = Menu::new();
        let mut config = Configuration {
            tr_interval: Interval::from_tenths(9),
            auto_repeat_suppressed: true,
            numeric_layout: true,
            is_scanning: false,
        };
        select(&mut menu, &mut config, MenuItem::Reset);
        config.is_scanning = true;

        let action = menu.handle(PRESS, &mut config);
        assert_eq!(action, Some(MenuAction::Reset));
        assert_eq!(config, Configuration::default());
        assert_eq!(menu.cursor(), MenuCursor::default());
    }

    #[test]
    fn test_idle_step_changes_nothing() {
        let mut menu = Menu::new();
        let mut config = Configuration::default();
        assert_eq!(menu.handle(IDLE, &mut config), None);
        assert_eq!(config, Configuration::default());
    }

    proptest! {
        #[test]
        fn state_always_in_range(
            inputs in proptest::collection::vec((any::<bool>(), -1i8..=1), 0..300),
        ) {
            let mut menu = Menu::new();
            let mut config = Configuration::default();
            for (pressed, direction) in inputs {
                menu.handle(MenuInput { pressed, direction }, &mut config);

                let tenths = config.tr_interval.as_tenths();
                prop_assert!((5..=30).contains(&tenths));
                prop_assert!(menu.cursor().item.index() < MenuItem::COUNT);
                if let Focus::Submenu(edit) = menu.cursor().focus {
                    prop_assert!(matches!(edit, Edit::Interval(_) | Edit::Mode(_)));
                    prop_assert!((-15..=10).contains(&edit.offset()));
                }
            }
        }
    }
}
