//! This module implements RandomSource on top of the abstractions of the
//! standard "rand" crate.

use super::RandomSource;
use crate::numeric::Float;
use rand::{Rng, SeedableRng};
use rand_distr::Exp1;

// Select random number generation engine in use
#[cfg(feature = "f32")]
type Engine = rand_xoshiro::Xoshiro128Plus;
#[cfg(not(feature = "f32"))]
type Engine = rand_xoshiro::Xoshiro256Plus;

/// Facade which makes the rand crate look like a RandomSource
#[derive(Clone)]
pub struct RandGenerator {
    rng: Engine,
}
//
impl RandGenerator {
    /// Spawn a new random number generator from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Engine::seed_from_u64(seed),
        }
    }

    /// Generate a random floating-point number between 0 and 1
    pub fn random(&mut self) -> Float {
        self.rng.gen()
    }

    /// Switch to a non-overlapping stream, as if a very large amount of
    /// numbers had been generated
    pub fn jump(&mut self) {
        self.rng.jump();
    }

    /// Generator for the n-th of a sequence of independent streams
    pub fn stream(&self, index: usize) -> Self {
        let mut result = self.clone();
        for _ in 0..index {
            result.jump();
        }
        result
    }
}

impl RandomSource for RandGenerator {
    fn uniform(&mut self, lo: Float, hi: Float) -> Float {
        lo + (hi - lo) * self.random()
    }

    fn exponential(&mut self, mean: Float) -> Float {
        let unit: Float = self.rng.sample(Exp1);
        mean * unit
    }
}
