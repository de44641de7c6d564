//! Button module pins on the STM32F051.
//!
//! The HAL's GPIO types encode direction in the type, which doesn't fit a
//! runtime `configure()`, so this goes to the GPIO registers directly. The
//! part has no input inversion either; `read` applies it in software.

use crate::hal::pac;
use touch::pins::{Pin, Pins};

#[derive(Clone, Copy, Debug)]
enum Port {
    A,
    B,
}

const fn location(pin: Pin) -> (Port, u32) {
    match pin {
        Pin::Sense => (Port::B, 0),
        Pin::Press => (Port::B, 1),
        Pin::BuzzCtl => (Port::B, 2),
        Pin::LedCtl => (Port::B, 3),
        Pin::Led0 => (Port::A, 4),
        Pin::Led1 => (Port::A, 5),
        Pin::Buzz => (Port::A, 6),
    }
}

const MODE_INPUT: u32 = 0b00;
const MODE_OUTPUT: u32 = 0b01;
const PULL_UP: u32 = 0b01;

/// GPIOA and GPIOB are distinct PAC types with identical register names
macro_rules! port {
    ($self:ident, $port:expr, $regs:ident => $body:expr) => {
        match $port {
            Port::A => {
                let $regs = &$self.gpioa;
                $body
            }
            Port::B => {
                let $regs = &$self.gpiob;
                $body
            }
        }
    };
}

pub struct BoardPins {
    gpioa: pac::GPIOA,
    gpiob: pac::GPIOB,
}

impl BoardPins {
    /// Port clocks must already be enabled.
    pub fn new() -> Self {
        // The HAL split() owns both ports so it can hand out the serial pins. Steal the
        // registers back for the button lines, which nothing else touches.
        let dp = unsafe { pac::Peripherals::steal() };
        Self {
            gpioa: dp.GPIOA,
            gpiob: dp.GPIOB,
        }
    }

    fn set_mode(&mut self, pin: Pin, mode: u32) {
        let (port, bit) = location(pin);
        let shift = bit * 2;
        port!(self, port, regs => regs.moder.modify(|r, w| unsafe {
            w.bits((r.bits() & !(0b11 << shift)) | (mode << shift))
        }));
    }

    fn set_pull(&mut self, pin: Pin, pull: u32) {
        let (port, bit) = location(pin);
        let shift = bit * 2;
        port!(self, port, regs => regs.pupdr.modify(|r, w| unsafe {
            w.bits((r.bits() & !(0b11 << shift)) | (pull << shift))
        }));
    }
}

impl Pins for BoardPins {
    fn configure(&mut self) {
        for pin in Pin::OUTPUTS {
            self.clear(pin);
            self.set_mode(pin, MODE_OUTPUT);
        }
        for pin in Pin::INPUTS {
            self.set_mode(pin, MODE_INPUT);
            self.set_pull(pin, PULL_UP);
        }
    }

    fn read(&mut self, pin: Pin) -> bool {
        let (port, bit) = location(pin);
        if pin.is_input() {
            let idr: u32 = port!(self, port, regs => regs.idr.read().bits());
            // Pulled up, so touched / enabled pulls the line low
            idr & (1 << bit) == 0
        } else {
            let odr: u32 = port!(self, port, regs => regs.odr.read().bits());
            odr & (1 << bit) != 0
        }
    }

    fn set(&mut self, pin: Pin) {
        let (port, bit) = location(pin);
        port!(self, port, regs => regs.bsrr.write(|w| unsafe { w.bits(1 << bit) }));
    }

    fn clear(&mut self, pin: Pin) {
        let (port, bit) = location(pin);
        port!(self, port, regs => regs.bsrr.write(|w| unsafe { w.bits(1 << (bit + 16)) }));
    }

    fn toggle(&mut self, pin: Pin) {
        if self.read(pin) {
            self.clear(pin);
        } else {
            self.set(pin);
        }
    }
}
