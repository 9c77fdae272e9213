//! Encoder push button

use super::debounce::{Debouncer, Edge};

/// Edges seen on the latest update
///
/// Both flags are cleared by the next update, so each edge is seen by
/// exactly one loop iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEdges {
    pub just_pressed: bool,
    pub just_released: bool,
}

/// Debounced menu button state
pub struct MenuButton {
    debouncer: Debouncer,
}

impl MenuButton {
    pub const fn new(debounce_samples: u8) -> Self {
        Self {
            debouncer: Debouncer::new(debounce_samples),
        }
    }

    /// Sample the button (true = pressed) and return this iteration's edges
    pub fn update(&mut self, pressed: bool) -> ButtonEdges {
        match self.debouncer.update(pressed) {
            Some(Edge::Pressed) => ButtonEdges {
                just_pressed: true,
                just_released: false,
            },
            Some(Edge::Released) => ButtonEdges {
                just_pressed: false,
                just_released: true,
            },
            None => ButtonEdges::default(),
        }
    }
}
