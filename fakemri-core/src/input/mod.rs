//! Debounced inputs
//!
//! Raw levels are sampled once per loop iteration and only confirmed,
//! stable changes come out the other side.

pub mod button;
pub mod debounce;
pub mod encoder;
pub mod keys;

pub use button::{ButtonEdges, MenuButton};
pub use debounce::{Debouncer, Edge};
pub use encoder::QuadratureDecoder;
pub use keys::{KeyMatrix, KeySlot, KeyTransition, Transitions};
