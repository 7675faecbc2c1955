//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A [`Simulation`] owns exactly one `SimRng`, created from an explicit seed
//! (default 0).  Only stochastic map rules draw from the stream, strictly in
//! the engine's defined iteration order (cities → maps → rules → cells), so
//! two runs with the same seed and the same tick-aligned inputs produce
//! identical state.
//!
//! [`Simulation`]: https://docs.rs/ogb-sim

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable deterministic RNG stream for one simulation.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
