//! Sensor line filters.
//!
//! The touch line glitches, so the raw bit is passed through a majority vote
//! over the most recent samples before anything acts on it.

use crate::pins::{Pin, Pins};

pub trait Filter {
    /// Feed one raw sample and return the updated filtered state
    fn push(&mut self, sample: bool) -> bool;

    /// Filtered state as of the last push
    fn state(&self) -> bool;

    /// Read the sense line once and feed it through the filter
    fn sample_and_filter<P: Pins>(&mut self, pins: &mut P) -> bool {
        let raw = pins.read(Pin::Sense);
        self.push(raw)
    }
}

/// Majority vote over the last `N` samples.
///
/// The history is ordered newest-first. Ties resolve to `true`, so exactly half
/// set samples counts as a touch.
#[derive(Clone, Debug)]
pub struct MajorityFilter<const N: usize> {
    history: [bool; N],
    state: bool,
}

impl<const N: usize> MajorityFilter<N> {
    pub const THRESHOLD: usize = N / 2;

    const NON_EMPTY: () = assert!(N > 0, "history must hold at least one sample");

    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            history: [false; N],
            state: false,
        }
    }

    /// Samples, newest first
    pub fn history(&self) -> &[bool; N] {
        &self.history
    }

    /// Number of set samples currently in the history
    pub fn count(&self) -> usize {
        self.history.iter().filter(|s| **s).count()
    }
}

impl<const N: usize> Default for MajorityFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Filter for MajorityFilter<N> {
    fn push(&mut self, sample: bool) -> bool {
        // Shift toward the tail, dropping the oldest
        self.history.copy_within(0..N - 1, 1);
        self.history[0] = sample;

        self.state = self.count() >= Self::THRESHOLD;
        self.state
    }

    fn state(&self) -> bool {
        self.state
    }
}

/// No filtering: the filtered state is the raw sample
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough {
    state: bool,
}

impl Passthrough {
    pub const fn new() -> Self {
        Self { state: false }
    }
}

impl Filter for Passthrough {
    fn push(&mut self, sample: bool) -> bool {
        self.state = sample;
        sample
    }

    fn state(&self) -> bool {
        self.state
    }
}
