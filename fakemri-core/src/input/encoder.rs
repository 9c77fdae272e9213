//! Quadrature direction decoder
//!
//! Compares the absolute encoder position with the previous sample.
//! The sign is inverted on purpose: with the board's encoder
//! orientation a rising count is a clockwise turn, which moves the menu
//! cursor up (towards index 0).

/// Per-tick direction from the encoder position
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadratureDecoder {
    last: Option<i32>,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Direction since the previous call: -1 when the position rose,
    /// +1 when it fell, 0 when unchanged or on the first call
    pub fn step(&mut self, position: i32) -> i8 {
        let direction = match self.last {
            None => 0,
            Some(last) => {
                // Wrapping difference so the counter rolling over is one step
                let delta = position.wrapping_sub(last);
                if delta > 0 {
                    -1
                } else if delta < 0 {
                    1
                } else {
                    0
                }
            }
        };
        self.last = Some(position);
        direction
    }
}
