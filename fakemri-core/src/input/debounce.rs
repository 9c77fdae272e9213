//! Sample-count debounce
//!
//! Each input has a counter that must reach the threshold with
//! consecutive readings that disagree with the debounced state before
//! the debounced state flips. A single agreeing reading resets the
//! counter, so contact bounce never gets through.

/// A confirmed level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// Debounce filter for one momentary input
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    /// Debounced state, true = pressed
    state: bool,
    /// Consecutive raw readings that differ from `state`
    counter: u8,
    threshold: u8,
}

impl Debouncer {
    /// Create a released debouncer
    ///
    /// A threshold of 0 behaves like 1 (every change passes immediately).
    pub const fn new(threshold: u8) -> Self {
        Self {
            state: false,
            counter: 0,
            threshold: if threshold == 0 { 1 } else { threshold },
        }
    }

    /// Feed one raw sample (true = pressed)
    ///
    /// Returns an edge only on the sample that confirms a change.
    pub fn update(&mut self, pressed: bool) -> Option<Edge> {
        if pressed == self.state {
            self.counter = 0;
            return None;
        }

        self.counter += 1;
        if self.counter < self.threshold {
            return None;
        }

        self.counter = 0;
        self.state = pressed;
        Some(if pressed { Edge::Pressed } else { Edge::Released })
    }

    /// Debounced state
    pub fn is_pressed(&self) -> bool {
        self.state
    }
}
