//! Fake MRI Hardware Abstraction Layer
//!
//! This crate defines the hardware boundary of the macropad: the raw
//! signals the control loop consumes. Chip-specific code (the RP2040
//! firmware) only has to provide pins; everything above this layer is
//! board-agnostic and testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  fakemri-firmware (embassy, RP2040)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fakemri-core (control loop, menu)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fakemri-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::ActiveLow`] - Momentary switch inputs
//! - [`encoder::PositionCounter`], [`encoder::QuadratureCounter`] - Rotary encoder position

#![no_std]
#![deny(unsafe_code)]

pub mod encoder;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use encoder::{PositionCounter, QuadratureCounter};
pub use gpio::{ActiveLow, InputPin};
