//! Test doubles shared by the unit tests

use heapless::Vec;

use crate::config::KeyCode;
use crate::traits::{KeyboardOutput, OutputError};

/// One recorded HID event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sent {
    Press(KeyCode),
    Release(KeyCode),
}

/// Keyboard that records every event, optionally refusing them
#[derive(Default)]
pub struct RecordingKeyboard {
    pub sent: Vec<Sent, 64>,
    pub fail_with: Option<OutputError>,
    /// Accept presses but refuse every release with `QueueFull`
    pub refuse_releases: bool,
}

impl RecordingKeyboard {
    pub fn take(&mut self) -> Vec<Sent, 64> {
        core::mem::take(&mut self.sent)
    }
}

impl KeyboardOutput for RecordingKeyboard {
    fn press(&mut self, key: KeyCode) -> Result<(), OutputError> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.sent.push(Sent::Press(key)).map_err(|_| OutputError::QueueFull)
    }

    fn release(&mut self, key: KeyCode) -> Result<(), OutputError> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        if self.refuse_releases {
            return Err(OutputError::QueueFull);
        }
        self.sent.push(Sent::Release(key)).map_err(|_| OutputError::QueueFull)
    }
}
