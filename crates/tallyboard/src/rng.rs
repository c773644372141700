//! Injectable randomness for catalog sampling.
//!
//! The simulator and notifier pick catalog entries uniformly at random. The
//! source of that randomness is injected through the [`RandomSource`] trait so
//! production code can run from entropy while tests run from a fixed seed or
//! a scripted sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform discrete randomness.
pub trait RandomSource: Send {
    /// Pick a uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `len` is zero; callers must guarantee a
    /// non-empty range.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Pick a uniform value in the inclusive range `min..=max`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `min > max`.
    fn pick_u32(&mut self, min: u32, max: u32) -> u32;
}

/// The default random source, backed by [`StdRng`].
#[derive(Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create a source seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a source with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn pick_u32(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }
}

/// A deterministic source that replays a fixed sequence of values.
///
/// Each pick consumes the next value, reduced into the requested range.
/// The sequence wraps around when exhausted. Intended for tests and demos
/// that need exact control over which catalog entries are selected.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<u64>,
    pos: usize,
}

impl SequenceRandom {
    /// Create a source replaying the given values.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(values: Vec<u64>) -> Self {
        assert!(!values.is_empty(), "sequence must not be empty");
        Self { values, pos: 0 }
    }

    fn next_value(&mut self) -> u64 {
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}

impl RandomSource for SequenceRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty range");
        usize::try_from(self.next_value()).unwrap_or(usize::MAX) % len
    }

    fn pick_u32(&mut self, min: u32, max: u32) -> u32 {
        assert!(min <= max, "invalid range");
        let span = u64::from(max - min) + 1;
        min + u32::try_from(self.next_value() % span).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_random_index_in_range() {
        let mut rng = StdRandom::from_entropy();
        for _ in 0..100 {
            assert!(rng.pick_index(5) < 5);
        }
    }

    #[test]
    fn test_std_random_u32_in_range() {
        let mut rng = StdRandom::from_entropy();
        for _ in 0..100 {
            let value = rng.pick_u32(10, 20);
            assert!((10..=20).contains(&value));
        }
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.pick_index(100), b.pick_index(100));
        }
    }

    #[test]
    fn test_sequence_random_replays_values() {
        let mut rng = SequenceRandom::new(vec![0, 1, 2]);
        assert_eq!(rng.pick_index(5), 0);
        assert_eq!(rng.pick_index(5), 1);
        assert_eq!(rng.pick_index(5), 2);
        // Wraps around
        assert_eq!(rng.pick_index(5), 0);
    }

    #[test]
    fn test_sequence_random_reduces_modulo_len() {
        let mut rng = SequenceRandom::new(vec![7]);
        assert_eq!(rng.pick_index(5), 2);
    }

    #[test]
    fn test_sequence_random_u32_range() {
        let mut rng = SequenceRandom::new(vec![0, 5, 11]);
        assert_eq!(rng.pick_u32(10, 20), 10);
        assert_eq!(rng.pick_u32(10, 20), 15);
        assert_eq!(rng.pick_u32(10, 20), 10);
    }

    #[test]
    #[should_panic(expected = "sequence must not be empty")]
    fn test_sequence_random_rejects_empty() {
        let _ = SequenceRandom::new(vec![]);
    }
}
