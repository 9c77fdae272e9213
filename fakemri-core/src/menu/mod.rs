//! Encoder-driven menu
//!
//! Two levels: a cursor over four top-level items, and a per-item
//! submenu. The scan toggle and reset items act immediately and drop
//! straight back to the top level.

pub mod items;
pub mod machine;

pub use items::{BoundedOffset, Edit, IntervalOffset, MenuItem, ModeOffset};
pub use machine::{Focus, Menu, MenuAction, MenuCursor, MenuInput};
