//! Sequential back-end of event generation

use super::EventBatch;
use crate::Result;
use genky::random::RandomGenerator;

/// Generate events in sequential mode
///
/// We use batched logic even in sequential mode, in order to achieve
/// reproducibility with respect to multi-threaded runs: batch N always draws
/// from the base random stream jumped N times.
///
pub fn run_generation_impl(
    batch_sizes: &[usize],
    mut rng: RandomGenerator,
    generate_events: impl Fn(usize, &mut RandomGenerator) -> Result<EventBatch>,
    consume: &mut impl FnMut(EventBatch) -> Result<()>,
) -> Result<()> {
    for &batch_size in batch_sizes {
        let mut batch_rng = rng.clone();
        consume(generate_events(batch_size, &mut batch_rng)?)?;
        rng.jump();
    }
    Ok(())
}
