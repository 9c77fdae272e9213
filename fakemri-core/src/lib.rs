//! Board-agnostic core logic for the Fake MRI macropad
//!
//! This crate contains the real-time control loop and everything it
//! drives, independent of the RP2040 and of USB:
//!
//! - Debounced key and push-button inputs
//! - Quadrature direction decoding
//! - Drift-free trigger pulse scheduling
//! - Keyboard output emission (momentary and NAR modes)
//! - The encoder-driven menu state machine
//! - Presentation snapshot for the display and indicator LEDs
//!
//! [`Controller::tick`] runs one loop iteration in the fixed order:
//! pulse check, key matrix, key output, encoder, menu button, menu.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod input;
pub mod menu;
pub mod output;
pub mod presentation;
pub mod scheduler;
pub mod traits;

pub use controller::{Controller, RawInputs, TickReport};

#[cfg(test)]
mod testing;
