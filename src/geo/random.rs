//! Injectable randomness for the random-selection fallback tiers

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Source of uniform indices used when a tier has to pick blindly
pub trait RandomSource {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Thread-local generator for production use
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Seeded generator for reproducible runs
#[derive(Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed sequence of raw values, each reduced modulo `len`.
///
/// The sequence wraps around when exhausted; an empty sequence always yields 0.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    values: Vec<usize>,
    cursor: usize,
}

impl FixedSequence {
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of picks served so far
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedSequence {
    fn pick_index(&mut self, len: usize) -> usize {
        let raw = if self.values.is_empty() {
            0
        } else {
            self.values[self.cursor % self.values.len()]
        };
        self.cursor += 1;
        raw % len.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_sequence_replays_and_wraps() {
        let mut source = FixedSequence::new(vec![1, 5]);
        assert_eq!(source.pick_index(3), 1);
        assert_eq!(source.pick_index(3), 2);
        assert_eq!(source.pick_index(3), 1);
        assert_eq!(source.draws(), 3);
    }

    #[test]
    fn test_empty_fixed_sequence_yields_zero() {
        let mut source = FixedSequence::default();
        assert_eq!(source.pick_index(4), 0);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        let first: Vec<usize> = (0..16).map(|_| a.pick_index(10)).collect();
        let second: Vec<usize> = (0..16).map(|_| b.pick_index(10)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_thread_random_stays_in_range() {
        let mut source = ThreadRandom;
        for _ in 0..100 {
            assert!(source.pick_index(7) < 7);
        }
    }
}
