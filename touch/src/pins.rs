//! Logical pin contract consumed by the control loop.
//!
//! The core never sees registers. A board crate implements [`Pins`] for its
//! chip and is responsible for directions, pull-ups and input inversion, so
//! that a touched sensor or an asserted enable line always reads `true`.

/// Named hardware signals of the button module
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    /// Capacitive touch sensor
    Sense,
    /// Enables LED feedback
    LedCtl,
    /// Enables buzzer feedback
    BuzzCtl,
    /// Emulated mechanical press
    Press,
    Led0,
    Led1,
    /// Square wave buzzer drive
    Buzz,
}

impl Pin {
    pub const INPUTS: [Pin; 3] = [Pin::Sense, Pin::LedCtl, Pin::BuzzCtl];
    pub const OUTPUTS: [Pin; 4] = [Pin::Press, Pin::Led0, Pin::Led1, Pin::Buzz];

    pub const fn is_input(self) -> bool {
        matches!(self, Pin::Sense | Pin::LedCtl | Pin::BuzzCtl)
    }
}

pub trait Pins {
    /// One-time setup of directions, pull-ups and inversion. Called before the first read.
    fn configure(&mut self);

    /// Logical state of a pin. Inputs are already inverted, so `true` means touched / enabled.
    fn read(&mut self, pin: Pin) -> bool;

    fn set(&mut self, pin: Pin);

    fn clear(&mut self, pin: Pin);

    fn toggle(&mut self, pin: Pin);

    fn write(&mut self, pin: Pin, state: bool) {
        if state {
            self.set(pin);
        } else {
            self.clear(pin);
        }
    }
}
