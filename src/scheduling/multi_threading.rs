//! Multi-threaded back-end of event generation

use super::EventBatch;
use crate::Result;
use genky::random::RandomGenerator;

use std::sync::Mutex;

/// Generate events in multi-threaded mode
///
/// Each batch is generated by its own task, from the same random stream as
/// in sequential mode. Batches are consumed in order once all tasks are done.
///
pub fn run_generation_impl(
    batch_sizes: &[usize],
    mut rng: RandomGenerator,
    generate_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> Result<EventBatch>,
    consume: &mut impl FnMut(EventBatch) -> Result<()>,
) -> Result<()> {
    let results = BatchResults::new(batch_sizes.len());

    // This function is a synchronization scope: it will only return
    // once all inner tasks have been executed
    rayon::scope(|scope| {
        for (batch_id, &batch_size) in batch_sizes.iter().enumerate() {
            // Spawn a task which is responsible for generating the batch
            let mut task_rng = rng.clone();
            let results_ref = &results;
            let generate_events_ref = &generate_events;
            scope.spawn(move |_| {
                let result = generate_events_ref(batch_size, &mut task_rng);
                results_ref.set_task_result(batch_id, result);
            });

            // Move the next task to an independent random stream
            rng.jump();
        }
    });

    // Hand over the batches in order
    for result in results.into_results() {
        consume(result?)?;
    }
    Ok(())
}

/// Storage for the results of parallel tasks, indexed by task
struct BatchResults {
    results: Box<[Mutex<Option<Result<EventBatch>>>]>,
}
//
impl BatchResults {
    /// Set up results storage for N parallel tasks
    fn new(num_tasks: usize) -> Self {
        Self {
            results: (0..num_tasks)
                .map(|_| Mutex::new(None))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        }
    }

    /// Record the result of the n-th task
    fn set_task_result(&self, task_id: usize, result: Result<EventBatch>) {
        let mut lock = self.results[task_id]
            .lock()
            .expect("Mutex data should be valid");
        assert!(lock.is_none(), "Tasks should not report results twice");
        *lock = Some(result);
    }

    /// Extract the task results, in task order
    fn into_results(self) -> impl Iterator<Item = Result<EventBatch>> {
        self.results.into_vec().into_iter().map(|entry| {
            entry
                .into_inner()
                .expect("Mutex data should be valid")
                .expect("Result should be ready")
        })
    }
}
