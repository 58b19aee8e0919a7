//! Injectable randomness for the scheduler.
//!
//! Interval sampling and the initial shuffle both go through the
//! [`RandomSource`] trait so tests can script exact draws and verify
//! clamping behavior at queue boundaries. Uniformity over the stated
//! integer ranges is the only correctness requirement; the source does
//! not need to be cryptographically secure.

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

/// Uniform integer source used for interval sampling and shuffling.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` must be nonzero.
    fn next_below(&mut self, bound: usize) -> usize;
}

/// Production source backed by a PCG generator.
pub struct PcgSource(Mcg128Xsl64);

impl PcgSource {
    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self(Mcg128Xsl64::from_entropy())
    }

    /// Source with a fixed seed, for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self(Mcg128Xsl64::seed_from_u64(seed))
    }
}

impl RandomSource for PcgSource {
    fn next_below(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}

/// Deterministic source that replays a scripted sequence of draws.
///
/// Each scripted value is reduced modulo the requested bound; once the
/// script runs out, every draw yields 0. Intended for tests.
pub struct ScriptedSource {
    values: Vec<usize>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(values: &[usize]) -> Self {
        Self {
            values: values.to_vec(),
            position: 0,
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_below(&mut self, bound: usize) -> usize {
        let value = self.values.get(self.position).copied().unwrap_or(0);
        self.position += 1;
        value % bound
    }
}

/// In-place Fisher-Yates shuffle. Every permutation of the slice is
/// equally likely when the source is uniform; runs in O(n).
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}
