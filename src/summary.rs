//! This module accumulates run statistics across generated events, in a way
//! which can be merged across batches of events

use crate::event::Event;
use genky::{
    constants::Particle,
    lookup::{sector_fold, NUM_SECTORS},
    FourMomentum,
};

/// Statistics of a generator run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Number of generated events
    pub events: usize,

    /// Number of kinematically forbidden reaction points which were rejected
    pub rejected: usize,

    /// Number of decayed particles
    pub decays: usize,

    /// Number of scattered electrons in each detector sector
    pub electron_sectors: [usize; NUM_SECTORS],
}
//
impl RunSummary {
    /// Start with empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate one generated event into the statistics
    pub fn integrate(&mut self, event: &Event, rejected: usize) -> genky::Result<()> {
        self.events += 1;
        self.rejected += rejected;
        self.decays += event.tracks().iter().filter(|track| !track.active).count();
        for track in event.tracks() {
            if track.particle == Particle::Electron && track.parent.is_none() {
                let (_local_phi, sector) = sector_fold(track.momentum.phi().to_degrees())?;
                self.electron_sectors[usize::from(sector) - 1] += 1;
            }
        }
        Ok(())
    }

    /// Integrate statistics from another RunSummary
    #[allow(clippy::needless_pass_by_value)]
    pub fn merge(&mut self, other: Self) {
        self.events += other.events;
        self.rejected += other.rejected;
        self.decays += other.decays;
        for (mine, theirs) in self.electron_sectors.iter_mut().zip(other.electron_sectors) {
            *mine += theirs;
        }
    }

    /// Report the statistics
    pub fn report(&self) {
        tracing::info!(
            events = self.events,
            rejected = self.rejected,
            decays = self.decays,
            "Generation finished"
        );
        for (idx, &count) in self.electron_sectors.iter().enumerate() {
            tracing::info!(sector = idx + 1, electrons = count, "Electron sector occupancy");
        }
    }
}
