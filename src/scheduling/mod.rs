//! This module takes care of scheduling the event generation work,
//! encapsulating use of multiple threads

#[cfg(feature = "multi-threading")]
mod multi_threading;
#[cfg(not(feature = "multi-threading"))]
mod sequential;

use crate::{event::Event, summary::RunSummary, Result};
use genky::random::RandomGenerator;

/// Size of the generated event batches
///
/// Events are generated in batches, and each batch draws its random numbers
/// from its own stream of the random number generator. This makes the event
/// sequence identical between sequential and parallel runs.
///
const EVENT_BATCH_SIZE: usize = 10_000;

/// Events generated by one batch, along with their statistics
pub struct EventBatch {
    /// Generated events, in order of generation
    pub events: Vec<Event>,

    /// Statistics of the batch
    pub summary: RunSummary,
}

/// Run event generation in the manner that was configured at build time.
///
/// Takes as parameters the total number of events to be generated, the seed
/// of the random number generator, a kernel that generates a certain number
/// of events from a random number generator, and a sink which receives the
/// generated batches in order.
///
/// Returns the merged run statistics.
///
pub fn run_generation(
    num_events: usize,
    seed: u64,
    generate_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> Result<EventBatch>,
    mut sink: impl FnMut(&[Event]) -> Result<()>,
) -> Result<RunSummary> {
    // Check that the user is being reasonable (should have already been checked
    // at configuration time, but bugs can happen...)
    assert!(num_events > 0, "Must generate at least one event");

    // Initialize the random number generator
    let rng = RandomGenerator::new(seed);

    // Split the work into batches
    let batch_sizes = (0..num_events)
        .step_by(EVENT_BATCH_SIZE)
        .map(|start| EVENT_BATCH_SIZE.min(num_events - start))
        .collect::<Vec<_>>();

    // Generate the batches and hand them over to the sink in order
    let mut summary = RunSummary::new();
    let mut consume = |batch: EventBatch| -> Result<()> {
        sink(&batch.events)?;
        summary.merge(batch.summary);
        Ok(())
    };

    #[cfg(not(feature = "multi-threading"))]
    sequential::run_generation_impl(&batch_sizes, rng, generate_events, &mut consume)?;

    #[cfg(feature = "multi-threading")]
    multi_threading::run_generation_impl(&batch_sizes, rng, generate_events, &mut consume)?;

    Ok(summary)
}
