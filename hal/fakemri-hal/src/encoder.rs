//! Rotary encoder position counting
//!
//! Turns the two quadrature channel levels into an absolute, wrapping
//! detent count. The count only says how far the knob has moved; turning
//! the count into a menu direction is the job of the core's decoder.

/// Source of an absolute encoder position
pub trait PositionCounter {
    /// Current position in detents (wraps on overflow)
    fn position(&self) -> i32;
}

/// Counter state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature detent counter
///
/// Both channels idle high (pull-ups). One detent runs through a full
/// Gray-code cycle:
///
/// ```text
/// CW:  (1,1) -> (0,1) -> (0,0) -> (1,x | x,1)   A falls first, +1
/// CCW: (1,1) -> (1,0) -> (0,0) -> (1,x | x,1)   B falls first, -1
/// ```
///
/// A partial cycle that falls back to (1,1) is contact bounce and does
/// not count.
#[derive(Debug, Clone)]
pub struct QuadratureCounter {
    phase: Phase,
    last_a: bool,
    last_b: bool,
    position: i32,
}

impl Default for QuadratureCounter {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl QuadratureCounter {
    /// Create a counter from the channel levels sampled at startup
    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            phase: Phase::Idle,
            last_a: a,
            last_b: b,
            position: 0,
        }
    }

    /// Feed one sample of both channels
    ///
    /// Returns the position change caused by this sample (-1, 0 or +1).
    /// Should be called often enough to see every intermediate state
    /// (every 0.5-2ms for a hand-turned knob).
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        if a == self.last_a && b == self.last_b {
            return 0;
        }
        self.last_a = a;
        self.last_b = b;

        let delta = self.decode(a, b);
        self.position = self.position.wrapping_add(delta as i32);
        delta
    }

    fn decode(&mut self, a: bool, b: bool) -> i8 {
        match self.phase {
            Phase::Idle => {
                if !a && b {
                    self.phase = Phase::CwStep1;
                } else if a && !b {
                    self.phase = Phase::CcwStep1;
                }
                0
            }
            Phase::CwStep1 | Phase::CcwStep1 => {
                if !a && !b {
                    self.phase = if self.phase == Phase::CwStep1 {
                        Phase::CwStep2
                    } else {
                        Phase::CcwStep2
                    };
                } else if a && b {
                    // bounce
                    self.phase = Phase::Idle;
                }
                0
            }
            Phase::CwStep2 => {
                if a || b {
                    self.phase = Phase::Idle;
                    return 1;
                }
                0
            }
            Phase::CcwStep2 => {
                if a || b {
                    self.phase = Phase::Idle;
                    return -1;
                }
                0
            }
        }
    }
}

impl PositionCounter for QuadratureCounter {
    fn position(&self) -> i32 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(counter: &mut QuadratureCounter, samples: &[(bool, bool)]) -> i32 {
        let mut total = 0;
        for &(a, b) in samples {
            total += counter.update(a, b) as i32;
        }
        total
    }

    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const CCW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];

    #[test]
    fn test_clockwise_detent_counts_up() {
        let mut counter = QuadratureCounter::default();
        assert_eq!(feed(&mut counter, &CW), 1);
        assert_eq!(counter.position(), 1);
    }

    #[test]
    fn test_counter_clockwise_detent_counts_down() {
        let mut counter = QuadratureCounter::default();
        feed(&mut counter, &CCW);
        feed(&mut counter, &CCW);
        assert_eq!(counter.position(), -2);
    }

    #[test]
    fn test_bounce_does_not_count() {
        let mut counter = QuadratureCounter::default();
        feed(&mut counter, &[(false, true), (true, true), (false, true), (true, true)]);
        assert_eq!(counter.position(), 0);
    }

    #[test]
    fn test_repeated_samples_are_ignored() {
        let mut counter = QuadratureCounter::default();
        feed(
            &mut counter,
            &[(false, true), (false, true), (false, false), (false, false), (true, false)],
        );
        assert_eq!(counter.position(), 1);
    }

    #[test]
    fn test_position_wraps() {
        let mut counter = QuadratureCounter::default();
        counter.position = i32::MAX;
        feed(&mut counter, &CW);
        assert_eq!(counter.position(), i32::MIN);
    }
}
