// src/sampling/stream.rs

use crate::sampling::table::IntervalTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform integer draw source.
///
/// Every random quantity in every scenario flows through one of these, so a
/// run is reproducible by swapping in a seeded or scripted stream. Nothing
/// in the crate touches a process-wide generator.
pub trait DigitStream {
    /// Returns a draw in `[low, high]`, both ends inclusive.
    fn draw(&mut self, low: u32, high: u32) -> u32;
}

/// Random digits from a seedable generator.
#[derive(Debug)]
pub struct RandomDigits {
    rng: StdRng,
}

impl RandomDigits {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed stream for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DigitStream for RandomDigits {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed digit sequence, cycling when exhausted. Digits outside
/// the requested range are clamped into it.
///
/// Intended for tests and worked textbook examples where the random-digit
/// column is given.
#[derive(Debug, Clone)]
pub struct ScriptedDigits {
    digits: Vec<u32>,
    cursor: usize,
}

impl ScriptedDigits {
    pub fn new(digits: Vec<u32>) -> Self {
        assert!(!digits.is_empty(), "scripted stream needs at least one digit");
        Self { digits, cursor: 0 }
    }
}

impl DigitStream for ScriptedDigits {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        let digit = self.digits[self.cursor % self.digits.len()];
        self.cursor += 1;
        digit.clamp(low, high)
    }
}

/// A draw together with the outcome it mapped to. The result tables all
/// show the random digit next to the sampled value, so both travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampled<T> {
    pub digit: u32,
    pub outcome: T,
}

/// Draws over the table's own range and samples it.
pub fn draw_from<T: Copy>(table: &IntervalTable<T>, digits: &mut dyn DigitStream) -> Sampled<T> {
    let digit = digits.draw(table.range_min(), table.range_max());
    Sampled {
        digit,
        outcome: table.sample(digit),
    }
}
