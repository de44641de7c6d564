//! Touch feedback LEDs.

use crate::pins::{Pin, Pins};

/// Light both LEDs while touched, if LED feedback is enabled.
///
/// The enable line is read on every call. Returns whether the LEDs are lit.
pub fn update<P: Pins>(pins: &mut P, touched: bool) -> bool {
    let lit = touched && pins.read(Pin::LedCtl);
    pins.write(Pin::Led0, lit);
    pins.write(Pin::Led1, lit);
    lit
}
