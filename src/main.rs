//! genky: a KY / single-pion electroproduction event generator
//!
//!
//! # Introduction (for the physicist)
//!
//! This program generates e p → e' meson baryon events (K⁺Λ, K⁺Σ⁰, π⁰p or
//! π⁺n) for detector simulation. Reaction points are drawn uniformly over the
//! configured Q² and W ranges and over the center-of-mass emission angles,
//! the reaction products are brought to the laboratory frame, and unstable
//! products are optionally decayed, including the displaced Λ vertex.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The program proceeds in a straightforward way:
//!
//! * read in the configuration file
//! * generate batches of events, each batch from its own random stream
//! * write the events to a LUND file in generation order
//! * report the run statistics
//!
//! Batches may be generated in parallel, with the same results as in a
//! sequential run.

#![warn(missing_docs)]

mod config;
mod event;
mod evgen;
mod output;
mod scheduling;
mod summary;

use crate::{
    config::Configuration, evgen::EventGenerator, output::LundWriter,
    scheduling::EventBatch, summary::RunSummary,
};
use genky::random::RandomGenerator;

use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use std::{env, time::Instant};

/// We'll use eyre's type-erased result type throughout the application
type Result<T> = eyre::Result<T>;

/// Configuration file used when none is specified on the command line
const DEFAULT_CONFIG_FILE: &str = "genky.cfg";

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    // ### LOGGING SETUP ###

    // Log level can be tuned through the RUST_LOG environment variable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // ### CONFIGURATION READOUT ###

    let config_file = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_owned());
    let cfg = Configuration::load(&config_file).wrap_err("Failed to load the configuration")?;

    // ### GENERATION ###

    let saved_time = Instant::now();
    let evgen = EventGenerator::new(&cfg);
    let mut writer = LundWriter::create(&cfg.output_file)?;

    // This kernel generates a number of events, given an initial random number
    // generator state, and returns them along with their statistics
    let generate_events = |num_events: usize, rng: &mut RandomGenerator| -> Result<EventBatch> {
        let mut events = Vec::with_capacity(num_events);
        let mut summary = RunSummary::new();
        for _ in 0..num_events {
            let (event, rejected) = evgen
                .generate(rng)
                .wrap_err("Could not find a kinematically allowed reaction point")?;
            summary.integrate(&event, rejected)?;
            events.push(event);
        }
        Ok(EventBatch { events, summary })
    };

    let summary = scheduling::run_generation(cfg.num_events, cfg.seed, generate_events, |events| {
        writer.write_events(events)
    })?;
    writer.finish()?;

    // ### RESULTS DISPLAY ###

    summary.report();
    tracing::info!(
        elapsed = ?saved_time.elapsed(),
        output_file = %cfg.output_file,
        "Events written"
    );
    Ok(())
}
