//! Key event emitter
//!
//! Two delivery modes for the response keys:
//!
//! - momentary (default): a physical press sends press+release at once,
//!   the physical release sends nothing
//! - NAR (auto-repeat suppressed): press on physical press, release on
//!   physical release
//!
//! The trigger pulse is always momentary.

use heapless::Vec;

use crate::config::{KeyCode, KEY_COUNT, LAYOUT_LEN};
use crate::traits::{KeyboardOutput, OutputError};

/// Distinct keycodes across both layouts
const PENDING_CAPACITY: usize = 2 * LAYOUT_LEN;

/// Emits HID events for key slots and trigger pulses
///
/// Tracks which keycode is held down on the host for each slot so the
/// release always matches the press, even if the layout or the mode
/// changed while the key was held.
///
/// A release the keyboard refuses is queued and retried by
/// [`KeyEmitter::flush`], so the host never keeps a key down.
#[derive(Debug, Default)]
pub struct KeyEmitter {
    held: [Option<KeyCode>; KEY_COUNT],
    pending: Vec<KeyCode, PENDING_CAPACITY>,
}

impl KeyEmitter {
    pub const fn new() -> Self {
        Self {
            held: [None; KEY_COUNT],
            pending: Vec::new(),
        }
    }

    /// Physical press on `slot`
    pub fn on_key_down<K: KeyboardOutput>(
        &mut self,
        slot: usize,
        key: KeyCode,
        hold: bool,
        keyboard: &mut K,
    ) -> Result<(), OutputError> {
        let mut first_err = None;
        if let Some(stale) = self.held[slot].take() {
            first_err = self.release(stale, keyboard).err();
        }

        keyboard.press(key)?;
        // This press brings its own release
        self.pending.retain(|&k| k != key);
        if hold {
            self.held[slot] = Some(key);
        } else {
            self.release(key, keyboard)?;
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Physical release on `slot`
    pub fn on_key_up<K: KeyboardOutput>(
        &mut self,
        slot: usize,
        keyboard: &mut K,
    ) -> Result<(), OutputError> {
        match self.held[slot].take() {
            Some(key) => self.release(key, keyboard),
            None => Ok(()),
        }
    }

    /// Synthetic trigger keystroke
    pub fn pulse<K: KeyboardOutput>(
        &mut self,
        key: KeyCode,
        keyboard: &mut K,
    ) -> Result<(), OutputError> {
        keyboard.press(key)?;
        self.pending.retain(|&k| k != key);
        self.release(key, keyboard)
    }

    /// Retry queued releases in order, stopping at the first refusal
    pub fn flush<K: KeyboardOutput>(&mut self, keyboard: &mut K) -> Result<(), OutputError> {
        while let Some(&key) = self.pending.first() {
            keyboard.release(key)?;
            self.pending.remove(0);
        }
        Ok(())
    }

    /// Keycode currently held on the host for `slot`
    pub fn held(&self, slot: usize) -> Option<KeyCode> {
        self.held[slot]
    }

    /// Releases still owed to the host
    pub fn pending_releases(&self) -> &[KeyCode] {
        &self.pending
    }

    fn release<K: KeyboardOutput>(
        &mut self,
        key: KeyCode,
        keyboard: &mut K,
    ) -> Result<(), OutputError> {
        let result = keyboard.release(key);
        if result.is_err() && !self.pending.contains(&key) {
            // Capacity covers every distinct keycode
            let _ = self.pending.push(key);
        }
        result
    }
}
