//! Configuration types
//!
//! Runtime configuration edited through the menu, plus the tuning
//! constants fixed at build time.

pub mod tuning;
pub mod types;

pub use tuning::*;
pub use types::*;
