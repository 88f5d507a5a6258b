//! This module is in charge of writing generated events to disk, in the LUND
//! text format understood by the detector simulation

use crate::{event::Event, Result};
use genky::momentum::{E, X, Y, Z};

use eyre::WrapErr;

use std::{
    fs::File,
    io::{BufWriter, Write},
};

/// LUND event file writer
pub struct LundWriter<W: Write> {
    out: W,
}
//
impl LundWriter<BufWriter<File>> {
    /// Create (or truncate) a LUND file on disk
    pub fn create(file_name: &str) -> Result<Self> {
        let file = File::create(file_name)
            .wrap_err_with(|| format!("Could not create output file {}", file_name))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}
//
impl<W: Write> LundWriter<W> {
    /// Write LUND events to an arbitrary output
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write down an event
    ///
    /// The header line carries the number of tracks followed by the reaction
    /// kinematics (W, Q², ω). Each track line then lists its 1-based index,
    /// charge, activity flag, PDG code, 1-based parent index (0 for primary
    /// particles), momentum, mass and vertex.
    ///
    pub fn write_event(&mut self, event: &Event) -> Result<()> {
        let tracks = event.tracks();
        writeln!(
            self.out,
            "{} 1 1 0 0 0 0 {:.5} {:.5} {:.5}",
            tracks.len(),
            event.w,
            event.q2,
            event.omega
        )?;
        for (idx, track) in tracks.iter().enumerate() {
            let p = &track.momentum;
            writeln!(
                self.out,
                "{} {} {} {} {} 0 {:.5} {:.5} {:.5} {:.5} {:.5} {:.4} {:.4} {:.4}",
                idx + 1,
                track.particle.charge(),
                u8::from(track.active),
                track.particle.lund_id(),
                track.parent.map_or(0, |parent| parent + 1),
                p[X],
                p[Y],
                p[Z],
                p[E],
                track.particle.mass(),
                track.vertex.x,
                track.vertex.y,
                track.vertex.z,
            )?;
        }
        Ok(())
    }

    /// Write down a batch of events
    pub fn write_events(&mut self, events: &[Event]) -> Result<()> {
        for event in events {
            self.write_event(event)?;
        }
        Ok(())
    }

    /// Flush buffered output and give back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().wrap_err("Failed to flush the output file")?;
        Ok(self.out)
    }
}
