//! Response key matrix
//!
//! Four momentary keys, each with its own debouncer. Slot order is the
//! logical order used by the layouts, not the physical key numbering.

use heapless::Vec;

use super::debounce::{Debouncer, Edge};
use crate::config::{KeyCode, Layout, KEY_COUNT, LETTER_LAYOUT};
use crate::presentation::{Rgb, OFF_COLORS, ON_COLOR};

/// NeoPixel index under each logical slot (physical keys 12, 9, 3, 6)
pub const LED_INDEX: [u8; KEY_COUNT] = [11, 8, 2, 5];

/// Transitions reported by one poll (at most one per key)
pub type Transitions = Vec<KeyTransition, KEY_COUNT>;

/// A debounced key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyTransition {
    /// Logical slot (0..KEY_COUNT)
    pub slot: usize,
    pub edge: Edge,
}

impl KeyTransition {
    pub fn is_press(&self) -> bool {
        self.edge == Edge::Pressed
    }
}

/// One physical response key
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySlot {
    pub index: u8,
    /// NeoPixel under this key
    pub led: u8,
    /// Keycode from the active layout
    pub keycode: KeyCode,
    pub is_down: bool,
    pub indicator: Rgb,
}

impl KeySlot {
    fn new(index: usize) -> Self {
        Self {
            index: index as u8,
            led: LED_INDEX[index],
            keycode: LETTER_LAYOUT.key(index),
            is_down: false,
            indicator: OFF_COLORS[index],
        }
    }

    fn set_down(&mut self, down: bool) {
        self.is_down = down;
        self.indicator = if down {
            ON_COLOR
        } else {
            OFF_COLORS[self.index as usize]
        };
    }
}

/// Debounced key matrix
pub struct KeyMatrix {
    slots: [KeySlot; KEY_COUNT],
    debouncers: [Debouncer; KEY_COUNT],
}

impl KeyMatrix {
    pub fn new(debounce_samples: u8) -> Self {
        Self {
            slots: core::array::from_fn(KeySlot::new),
            debouncers: [Debouncer::new(debounce_samples); KEY_COUNT],
        }
    }

    /// Sample every key once
    ///
    /// `raw[slot]` is true while the key is physically closed.
    pub fn poll(&mut self, raw: &[bool; KEY_COUNT]) -> Transitions {
        let mut transitions = Transitions::new();

        for (slot, (&pressed, debouncer)) in raw.iter().zip(self.debouncers.iter_mut()).enumerate()
        {
            let Some(edge) = debouncer.update(pressed) else {
                continue;
            };
            let down = edge == Edge::Pressed;
            if self.slots[slot].is_down == down {
                continue;
            }
            self.slots[slot].set_down(down);
            // Capacity equals KEY_COUNT, one transition per key at most
            let _ = transitions.push(KeyTransition { slot, edge });
        }

        transitions
    }

    /// Point every slot at the keycode from `layout`
    pub fn assign_layout(&mut self, layout: &Layout) {
        for slot in &mut self.slots {
            slot.keycode = layout.key(slot.index as usize);
        }
    }

    pub fn slot(&self, slot: usize) -> &KeySlot {
        &self.slots[slot]
    }

    pub fn slots(&self) -> &[KeySlot; KEY_COUNT] {
        &self.slots
    }
}
