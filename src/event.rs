//! This module defines the properties and storage of generated events

use genky::{
    constants::Particle,
    decay::{DecayProducts, Vertex},
    numeric::Float,
    Momentum,
};

/// A particle of a generated event, as it will be handed to the simulation
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// Particle species
    pub particle: Particle,

    /// Lab-frame 4-momentum (GeV)
    pub momentum: Momentum,

    /// Production vertex (cm)
    pub vertex: Vertex,

    /// Index of the parent track, if this track comes from a decay
    pub parent: Option<usize>,

    /// Whether the particle should be tracked (false once it has decayed)
    pub active: bool,
}

/// Storage for e p -> e' meson baryon events, including decay products
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Momentum transfer (GeV²)
    pub q2: Float,

    /// Hadronic invariant mass (GeV)
    pub w: Float,

    /// Virtual photon energy in the lab frame (GeV)
    pub omega: Float,

    /// Final state particles, in order of production
    tracks: Vec<Track>,
}
//
impl Event {
    /// Start an event without any particle
    pub fn new(q2: Float, w: Float, omega: Float) -> Self {
        Self {
            q2,
            w,
            omega,
            tracks: Vec::with_capacity(8),
        }
    }

    /// Add a primary particle, returning its track index
    pub fn push(&mut self, particle: Particle, momentum: Momentum, vertex: Vertex) -> usize {
        self.push_track(Track {
            particle,
            momentum,
            vertex,
            parent: None,
            active: true,
        })
    }

    /// Replace a particle with its two decay daughters, produced at `vertex`
    ///
    /// The parent track stays in the event but is no longer active. Returns
    /// the track indices of the daughters.
    ///
    pub fn decay(
        &mut self,
        parent: usize,
        daughters: (Particle, Particle),
        products: DecayProducts,
        vertex: Vertex,
    ) -> (usize, usize) {
        self.tracks[parent].active = false;
        let mut daughter = |particle, momentum| {
            self.push_track(Track {
                particle,
                momentum,
                vertex,
                parent: Some(parent),
                active: true,
            })
        };
        let first = daughter(daughters.0, products.first);
        let second = daughter(daughters.1, products.second);
        (first, second)
    }

    /// Access the particles of the event
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Access one particle of the event
    pub fn track(&self, index: usize) -> &Track {
        &self.tracks[index]
    }

    fn push_track(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genky::momentum::cartesian;

    #[test]
    fn decayed_tracks_are_inactive() {
        let mut event = Event::new(1., 2., 2.2);
        let vertex = Vertex::zeros();
        let pi0 = event.push(Particle::PiZero, cartesian(0., 0., 1., 1.01), vertex);
        let products = DecayProducts {
            first: cartesian(0., 0.1, 0.5, 0.51),
            second: cartesian(0., -0.1, 0.5, 0.51),
        };
        let (g1, g2) = event.decay(pi0, (Particle::Photon, Particle::Photon), products, vertex);
        assert_eq!((g1, g2), (1, 2));
        assert!(!event.track(pi0).active);
        assert!(event.track(g1).active);
        assert_eq!(event.track(g2).parent, Some(pi0));
        assert_eq!(event.tracks().len(), 3);
    }
}
