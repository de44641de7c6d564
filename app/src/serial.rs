/// An IRQ driven, transmit-only serial log.
///
/// Writers enqueue bytes and return immediately; the USART1 interrupt drains
/// the queue. If the queue is full the byte is dropped, so logging never
/// stalls the control loop.
pub mod uart1 {
    use crate::interrupt;
    use crate::hal::{
        pac,
        prelude::*,
        serial::{
            Event,
            Serial,
        }
    };
    use heapless::spsc::{Consumer, Producer, Queue};
    use stm32f0xx_hal::gpio::{
        gpiob,
        Alternate,
        AF0,
    };

    const TX_Q_SIZE: usize = 256;

    static mut TX_Q_CONSUMER: Option<Consumer<u8, TX_Q_SIZE>> = None;
    static mut TX_Q_PRODUCER: Option<Producer<u8, TX_Q_SIZE>> = None;

    type TxPinType = gpiob::PB6<Alternate<AF0>>;
    type RxPinType = gpiob::PB7<Alternate<AF0>>;
    static mut SERIAL: Option<Serial<pac::USART1, TxPinType, RxPinType>> = None;

    pub struct Uart1Tx {}

    impl core::fmt::Write for Uart1Tx {
        fn write_str(&mut self, s: &str) -> Result<(), core::fmt::Error> {
            for b in s.bytes() {
                write_byte(b);
            }
            Ok(())
        }
    }

    /// Must be called once during application initialization, before any logging
    pub fn init(serial: Serial<pac::USART1, TxPinType, RxPinType>, irq_prio: u8) {
        let core = unsafe { pac::CorePeripherals::steal() };
        let mut nvic = core.NVIC;

        static mut TX_Q: Queue<u8, TX_Q_SIZE> = Queue::new();

        let (tx_q_producer, tx_q_consumer) = unsafe { TX_Q.split() };

        unsafe {
            TX_Q_PRODUCER = Some(tx_q_producer);
            TX_Q_CONSUMER = Some(tx_q_consumer);
            SERIAL = Some(serial);

            nvic.set_priority(pac::Interrupt::USART1, irq_prio);
            pac::NVIC::unmask(pac::Interrupt::USART1);
        }
    }

    pub fn write_byte(b: u8) {
        let (tx_q_producer, serial) = unsafe {
            match (TX_Q_PRODUCER.as_mut(), SERIAL.as_mut()) {
                (Some(p), Some(s)) => (p, s),
                // Not initialized; nowhere to send it
                _ => return,
            }
        };
        // Drop the byte if the queue is full
        let _ = tx_q_producer.enqueue(b);
        serial.listen(Event::Txe);
    }

    pub fn writer() -> Uart1Tx {
        Uart1Tx {}
    }

    #[interrupt]
    fn USART1() {
        let serial = unsafe { SERIAL.as_mut().unwrap_unchecked() };
        let tx_q_consumer = unsafe { TX_Q_CONSUMER.as_mut().unwrap_unchecked() };
        let usart1 = unsafe { crate::hal::pac::Peripherals::steal().USART1 };

        let isr = (*usart1).isr.read();
        if isr.txe().bit_is_set() {
            match tx_q_consumer.dequeue() {
                Some(b) => {
                    serial.write(b).ok();
                },
                None => {
                    // Queue drained. TXE is unmasked again by the next write.
                    serial.unlisten(Event::Txe);
                }
            }
        }
    }
}

/// Format a line into the serial log
macro_rules! log {
    ($($arg:tt)*) => {
        {
            let _ = core::fmt::write(&mut $crate::serial::uart1::writer(), format_args!($($arg)*));
        }
    };
}
