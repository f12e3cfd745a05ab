//! Injectable randomness for the randomized placer.
//!
//! The placer only needs uniform samples over a closed interval, so it takes
//! a [`RandomSource`] rather than a concrete RNG. Production code uses
//! [`SeededSource`]; tests can script exact positions with [`SequenceSource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform samples over `[lo, hi]`.
pub trait RandomSource {
    /// Sample uniformly from `[lo, hi]`. Returns `lo` when `hi <= lo`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// `StdRng`-backed source. Seeded runs are reproducible.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}

/// Replays a fixed cycle of fractions in `[0, 1]`, scaled into each interval.
///
/// An empty sequence always yields `lo`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    fractions: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(fractions: impl Into<Vec<f64>>) -> Self {
        let fractions = fractions
            .into()
            .into_iter()
            .map(|f| f.clamp(0.0, 1.0))
            .collect();
        Self {
            fractions,
            cursor: 0,
        }
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if self.fractions.is_empty() {
            self.cursor += 1;
            return lo;
        }
        let f = self.fractions[self.cursor % self.fractions.len()];
        self.cursor += 1;
        if hi <= lo {
            lo
        } else {
            lo + f * (hi - lo)
        }
    }
}
