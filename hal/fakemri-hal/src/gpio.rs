//! GPIO input abstractions
//!
//! Momentary switches on the macropad are wired to ground with the
//! internal pull-up enabled, so "pressed" reads as a low level.

/// Digital input pin
///
/// Implemented for every `embedded-hal` 1.0 input pin. A pin that fails
/// to read is reported as low.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: embedded_hal::digital::InputPin> InputPin for T {
    fn is_high(&mut self) -> bool {
        embedded_hal::digital::InputPin::is_high(self).unwrap_or(false)
    }
}

/// Switch input that is active when the line is pulled low
pub struct ActiveLow<P> {
    pin: P,
}

impl<P: InputPin> ActiveLow<P> {
    /// Wrap a pulled-up switch pin
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Is the switch currently closed (pressed)?
    pub fn is_active(&mut self) -> bool {
        self.pin.is_low()
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}
