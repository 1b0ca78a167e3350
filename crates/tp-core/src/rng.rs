//! Seedable simulation RNG.
//!
//! There is no global randomness anywhere in the workspace: every random
//! choice (random destinations, random topologies) draws from a `SimRng`
//! that the caller constructs from a seed and injects.  The same seed always
//! yields the same sequence, so whole simulations replay exactly.
//!
//! `SimRng` is `Clone` so the engine can snapshot it at the start of a step
//! and roll back if the step aborts.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic RNG for routing and generation.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    /// Stream offset of the router's RNG under a run's root seed.
    pub const ROUTER_STREAM: u64 = 1;

    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child RNG for the stream numbered `offset`.
    /// Two roots with the same seed hand out identical children.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed = self.random::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Choose a uniformly random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Sample `amount` distinct indices from `0..length` (order is random).
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, length, amount.min(length)).into_vec()
    }
}
