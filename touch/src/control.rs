//! The polling loop tying the filter and the three output drivers together.

use crate::buzzer::Buzzer;
use crate::filter::Filter;
use crate::pins::Pins;
use crate::{button, led};

/// What one loop iteration decided
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outputs {
    /// Filtered touch state, also the level of the press output
    pub pressed: bool,
    /// Feedback LEDs on
    pub lit: bool,
    /// Buzzer running (its output may still be low mid-period)
    pub buzzing: bool,
}

pub struct Controller<P, F> {
    pins: P,
    filter: F,
    buzzer: Buzzer,
}

impl<P: Pins, F: Filter> Controller<P, F> {
    /// Configures the pins. This is the only place `configure` is called.
    pub fn new(pins: P, filter: F) -> Self {
        Self::with_buzzer(pins, filter, Buzzer::default())
    }

    pub fn with_buzzer(mut pins: P, filter: F, buzzer: Buzzer) -> Self {
        pins.configure();
        Self {
            pins,
            filter,
            buzzer,
        }
    }

    /// Run a single iteration.
    ///
    /// The filter runs first so the press, LED and buzzer drivers all act on
    /// the same filtered state.
    pub fn step(&mut self) -> Outputs {
        let pressed = self.filter.sample_and_filter(&mut self.pins);
        button::update(&mut self.pins, pressed);
        let lit = led::update(&mut self.pins, pressed);
        let buzzing = self.buzzer.update(&mut self.pins, pressed);

        Outputs {
            pressed,
            lit,
            buzzing,
        }
    }

    /// Run a fixed number of iterations, handing each result to `observe`
    pub fn run_for<O: FnMut(&Outputs)>(&mut self, iterations: usize, mut observe: O) {
        for _ in 0..iterations {
            let outputs = self.step();
            observe(&outputs);
        }
    }

    /// Run forever. Only a reset gets out of here.
    pub fn run<O: FnMut(&Outputs)>(&mut self, mut observe: O) -> ! {
        loop {
            let outputs = self.step();
            observe(&outputs);
        }
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn buzzer(&self) -> &Buzzer {
        &self.buzzer
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::filter::{MajorityFilter, Passthrough};
    use crate::pins::mock::MockPins;
    use crate::pins::Pin;
    use crate::{BUZZ_DIVISOR, HISTORY_LEN};

    fn filtered() -> Controller<MockPins, MajorityFilter<HISTORY_LEN>> {
        Controller::new(MockPins::new(), MajorityFilter::new())
    }

    fn assert_outputs_consistent(pins: &MockPins, outputs: &Outputs) {
        assert_eq!(pins.level(Pin::Press), outputs.pressed);
        assert_eq!(pins.level(Pin::Led0), outputs.lit);
        assert_eq!(pins.level(Pin::Led1), outputs.lit);
        if !outputs.buzzing {
            assert!(!pins.level(Pin::Buzz));
        }
    }

    #[test]
    fn test_configures_once() {
        let mut c = filtered();
        assert_eq!(c.pins().configured, 1);
        c.run_for(500, |_| ());
        assert_eq!(c.pins().configured, 1);
    }

    #[test]
    fn test_idle() {
        let mut c = filtered();
        c.pins_mut().drive(Pin::LedCtl, true);
        c.pins_mut().drive(Pin::BuzzCtl, true);

        for _ in 0..200 {
            let outputs = c.step();
            assert_eq!(outputs, Outputs::default());
            assert_outputs_consistent(c.pins(), &outputs);
        }
        assert_eq!(c.buzzer().phase(), 0);
    }

    #[test]
    fn test_alternating_touch_presses() {
        let mut c = filtered();
        let mut last = Outputs::default();
        for i in 0..HISTORY_LEN {
            c.pins_mut().drive(Pin::Sense, i % 2 == 0);
            last = c.step();
        }
        assert!(last.pressed);
        assert!(c.pins().level(Pin::Press));
    }

    #[test]
    fn test_press_and_release() {
        let mut c = filtered();
        c.pins_mut().drive(Pin::LedCtl, true);

        c.pins_mut().drive(Pin::Sense, true);
        for i in 1..=40 {
            let outputs = c.step();
            assert_eq!(outputs.pressed, i >= 32, "touch iteration {}", i);
            assert_outputs_consistent(c.pins(), &outputs);
        }

        c.pins_mut().drive(Pin::Sense, false);
        for k in 1..=HISTORY_LEN {
            let outputs = c.step();
            // The true count drops below 32 on the 33rd release
            assert_eq!(outputs.pressed, k <= 32, "release iteration {}", k);
            assert_outputs_consistent(c.pins(), &outputs);
        }
    }

    #[test]
    fn test_buzzes_twice_per_period() {
        let mut c = filtered();
        c.pins_mut().drive(Pin::Sense, true);
        c.run_for(HISTORY_LEN, |_| ());
        assert!(c.filter().state());
        assert_eq!(c.buzzer().phase(), 0);

        c.pins_mut().drive(Pin::BuzzCtl, true);
        let mut buzzing = 0;
        c.run_for(2 * BUZZ_DIVISOR as usize, |o| {
            if o.buzzing {
                buzzing += 1;
            }
        });
        assert_eq!(buzzing, 2 * BUZZ_DIVISOR as usize);
        assert_eq!(c.pins().toggle_count(Pin::Buzz), 2);
    }

    #[test]
    fn test_leds_disabled() {
        let mut c = filtered();
        c.pins_mut().drive(Pin::Sense, true);
        c.pins_mut().drive(Pin::LedCtl, false);

        c.run_for(1000, |o| assert!(!o.lit));
        assert!(c.filter().state());
        assert!(!c.pins().level(Pin::Led0));
        assert!(!c.pins().level(Pin::Led1));
    }

    #[test]
    fn test_drivers_share_filtered_state() {
        let mut c = filtered();
        c.pins_mut().drive(Pin::LedCtl, true);
        c.pins_mut().drive(Pin::BuzzCtl, true);

        // Glitchy input around the threshold
        let pattern = [true, true, false, true, false, false, true, false, true, false];
        for i in 0..500 {
            c.pins_mut().drive(Pin::Sense, pattern[i % pattern.len()]);
            let outputs = c.step();
            assert_eq!(outputs.pressed, outputs.lit);
            assert_eq!(outputs.pressed, outputs.buzzing);
            assert_outputs_consistent(c.pins(), &outputs);
        }
    }

    #[test]
    fn test_unfiltered_follows_sense() {
        let mut c = Controller::new(MockPins::new(), Passthrough::new());
        c.pins_mut().drive(Pin::LedCtl, true);

        for touched in [true, false, false, true, true, false] {
            c.pins_mut().drive(Pin::Sense, touched);
            let outputs = c.step();
            assert_eq!(outputs.pressed, touched);
            assert_outputs_consistent(c.pins(), &outputs);
        }
    }

    #[test]
    fn test_buzzer_phase_kept_across_release() {
        let buzzer = Buzzer::new(100);
        let mut c = Controller::with_buzzer(MockPins::new(), Passthrough::new(), buzzer);
        c.pins_mut().drive(Pin::BuzzCtl, true);

        c.pins_mut().drive(Pin::Sense, true);
        c.run_for(60, |_| ());
        c.pins_mut().drive(Pin::Sense, false);
        c.run_for(10, |_| ());
        assert_eq!(c.buzzer().phase(), 60);
        assert!(!c.pins().level(Pin::Buzz));

        c.pins_mut().drive(Pin::Sense, true);
        c.run_for(40, |_| ());
        assert_eq!(c.pins().toggle_count(Pin::Buzz), 1);
        assert!(c.pins().level(Pin::Buzz));
    }
}
