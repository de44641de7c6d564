//! Square wave buzzer drive.
//!
//! There is no timer behind this: the output toggles every `divisor` loop
//! iterations, so the pitch follows the loop rate. The output is a square wave
//! meant to be filtered down to a tone by the board.

use crate::pins::{Pin, Pins};
use crate::BUZZ_DIVISOR;

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buzzer {
    phase: u16,
    divisor: u16,
}

impl Buzzer {
    pub const fn new(divisor: u16) -> Self {
        assert!(divisor > 0);
        Self { phase: 0, divisor }
    }

    /// Current position within the half-period
    pub fn phase(&self) -> u16 {
        self.phase
    }

    pub fn divisor(&self) -> u16 {
        self.divisor
    }

    /// Advance one loop iteration. Returns whether the buzzer is sounding.
    ///
    /// While silent the output is held low but the phase is kept, so a
    /// re-enabled buzzer picks up mid-period.
    pub fn update<P: Pins>(&mut self, pins: &mut P, touched: bool) -> bool {
        let sounding = touched && pins.read(Pin::BuzzCtl);
        if sounding {
            self.phase += 1;
            if self.phase == self.divisor {
                self.phase = 0;
                pins.toggle(Pin::Buzz);
            }
        } else {
            pins.clear(Pin::Buzz);
        }
        sounding
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new(BUZZ_DIVISOR)
    }
}
