#![no_main]
#![no_std]

use cortex_m;
use cortex_m_rt::entry;
use panic_halt as _;

use stm32f0xx_hal as hal;

use touch::control::{Controller, Outputs};
#[cfg(not(feature = "unfiltered"))]
use touch::filter::MajorityFilter;
#[cfg(feature = "unfiltered")]
use touch::filter::Passthrough;

use crate::hal::pac;
use crate::hal::pac::interrupt;
use crate::hal::prelude::*;

#[macro_use]
mod serial;
mod board;

const LOG_IRQ_PRIO: u8 = 4;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();

    let mut flash = dp.FLASH;
    let mut rcc = dp.RCC.configure().sysclk(48.mhz()).freeze(&mut flash);
    // split() enables the port clocks; the button lines are driven by board::BoardPins
    let _gpioa = dp.GPIOA.split(&mut rcc);
    let gpiob = dp.GPIOB.split(&mut rcc);

    // A library requiring a critical section to set a gpio AF register is bad and I just won't.
    let fake_cs = unsafe { cortex_m::interrupt::CriticalSection::new() };

    let tx_pin = gpiob.pb6.into_alternate_af0(&fake_cs);
    let rx_pin = gpiob.pb7.into_alternate_af0(&fake_cs);
    let uart = hal::serial::Serial::usart1(dp.USART1, (tx_pin, rx_pin), 115200.bps(), &mut rcc);
    serial::uart1::init(uart, LOG_IRQ_PRIO);

    #[cfg(not(feature = "unfiltered"))]
    let filter = MajorityFilter::<{ touch::HISTORY_LEN }>::new();
    #[cfg(feature = "unfiltered")]
    let filter = Passthrough::new();

    let mut controller = Controller::new(board::BoardPins::new(), filter);
    log!("touch: ready\r\n");

    let mut last = Outputs::default();
    controller.run(|outputs| {
        if outputs.pressed != last.pressed {
            log!("touch: {}\r\n", if outputs.pressed { "pressed" } else { "released" });
        }
        if outputs.lit != last.lit {
            log!("led: {}\r\n", if outputs.lit { "on" } else { "off" });
        }
        if outputs.buzzing != last.buzzing {
            log!("buzz: {}\r\n", if outputs.buzzing { "on" } else { "off" });
        }
        last = *outputs;
    })
}
