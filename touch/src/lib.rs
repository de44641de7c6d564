#![cfg_attr(not(test), no_std)]

pub mod buzzer;
pub mod button;
pub mod control;
pub mod filter;
pub mod led;
pub mod pins;

/// Number of raw sensor samples kept by the majority vote filter
pub const HISTORY_LEN: usize = 64;
/// Minimum count of set samples in the history for the filtered state to read as touched
pub const VOTE_THRESHOLD: usize = HISTORY_LEN / 2;
/// Loop iterations per buzzer half-period
pub const BUZZ_DIVISOR: u16 = 3300;
