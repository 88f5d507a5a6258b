//! Random number generation module. Decay sampling draws its numbers from an
//! explicitly supplied `RandomSource`, so that every worker can own its own
//! independently seeded stream.

mod standard;

use crate::numeric::Float;

pub use self::standard::RandGenerator;

/// Random number generator used by the event generator
pub type RandomGenerator = RandGenerator;

/// Source of the random numbers consumed by kinematics sampling
///
/// The order in which draws are requested is part of the reproducibility
/// contract of the decay functions.
///
pub trait RandomSource {
    /// Draw a number uniformly distributed in [lo, hi)
    fn uniform(&mut self, lo: Float, hi: Float) -> Float;

    /// Draw a number from an exponential distribution of the given mean
    fn exponential(&mut self, mean: Float) -> Float;
}
