use crate::pins::{Pin, Pins};

/// Drive the press output from the filtered touch state.
///
/// No hysteresis of its own; the filter already provides it.
pub fn update<P: Pins>(pins: &mut P, touched: bool) {
    pins.write(Pin::Press, touched);
}
