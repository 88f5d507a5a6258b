//! This module provides event generation facilities
//!
//! Reaction points (Q², W, lepton azimuth, hadron emission angles) are drawn
//! uniformly over the configured phase space. Weighting them by a
//! differential cross-section is left to downstream analysis.

use crate::{config::Configuration, event::Event};
use genky::{
    constants::Particle,
    decay::{self, Vertex},
    frame,
    numeric::{reals::consts::PI, Float},
    random::RandomGenerator,
    Channel, RandomSource,
};

/// Number of reaction points which may be rejected in a row before giving up
const MAX_ATTEMPTS: usize = 10_000;

/// Minimal width of the vertex z range for it to be sampled (cm)
const MIN_VERTEX_RANGE: Float = 0.01;

/// Uniformly sampled point of the reaction phase space
#[derive(Clone, Copy, Debug)]
struct ReactionPoint {
    q2: Float,
    w: Float,
    phi: Float,
    theta_k: Float,
    phi_k: Float,
}

/// Generator of e p -> e' meson baryon events
pub struct EventGenerator {
    /// Reaction channel
    channel: Channel,

    /// Beam energy
    e_beam: Float,

    /// Sampled Q² range
    q2_range: (Float, Float),

    /// Sampled W range, starting at or above the channel threshold
    w_range: (Float, Float),

    /// Sampled primary vertex z range
    vz_range: (Float, Float),

    /// Whether unstable products are decayed
    decay: bool,
}
//
impl EventGenerator {
    /// Set up event generation from the generator configuration
    pub fn new(cfg: &Configuration) -> Self {
        Self {
            channel: cfg.channel,
            e_beam: cfg.e_beam,
            q2_range: (cfg.q2_min, cfg.q2_max),
            w_range: (cfg.w_min_physical(), cfg.w_max),
            vz_range: (cfg.vz_min, cfg.vz_max),
            decay: cfg.decay,
        }
    }

    /// Generate an event
    ///
    /// Reaction points which turn out to be kinematically forbidden are
    /// re-sampled. Returns the event and the number of rejected points.
    ///
    pub fn generate(&self, rng: &mut RandomGenerator) -> genky::Result<(Event, usize)> {
        let mut rejected = 0;
        loop {
            let point = self.sample_point(rng);
            match self.build_event(&point, rng) {
                Ok(event) => return Ok((event, rejected)),
                Err(e) if rejected + 1 < MAX_ATTEMPTS => {
                    tracing::trace!(?point, error = %e, "Rejected reaction point");
                    rejected += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Draw a reaction point uniformly over the phase space
    fn sample_point(&self, rng: &mut RandomGenerator) -> ReactionPoint {
        let q2 = rng.uniform(self.q2_range.0, self.q2_range.1);
        let w = rng.uniform(self.w_range.0, self.w_range.1);
        let phi = rng.uniform(0., 2. * PI);
        let cos_theta_k = rng.uniform(-1., 1.);
        let phi_k = rng.uniform(0., 2. * PI);
        ReactionPoint {
            q2,
            w,
            phi,
            theta_k: cos_theta_k.acos(),
            phi_k,
        }
    }

    /// Compute the final state of a reaction point
    fn build_event(&self, point: &ReactionPoint, rng: &mut RandomGenerator) -> genky::Result<Event> {
        let (meson, baryon) = self.channel.products();
        let pe = frame::scattered_lepton(point.q2, point.w, point.phi, self.e_beam)?;
        let (p_meson, p_baryon) = frame::cms2lab(
            point.w,
            point.q2,
            point.phi,
            self.e_beam,
            point.theta_k,
            point.phi_k,
            meson.mass(),
            baryon.mass(),
        )?;

        // Primary vertex
        let (vz_min, vz_max) = self.vz_range;
        let vz = if vz_max - vz_min > MIN_VERTEX_RANGE {
            rng.uniform(vz_min, vz_max)
        } else {
            vz_max
        };
        let vertex = Vertex::new(0., 0., vz);

        let mut event = Event::new(point.q2, point.w, frame::omega(point.q2, point.w));
        event.push(Particle::Electron, pe, vertex);
        let meson_idx = event.push(meson, p_meson, vertex);
        let baryon_idx = event.push(baryon, p_baryon, vertex);
        if self.decay {
            self.decay_products(&mut event, meson_idx, baryon_idx, rng)?;
        }
        Ok(event)
    }

    /// Decay the unstable reaction products of an event
    fn decay_products(
        &self,
        event: &mut Event,
        meson_idx: usize,
        baryon_idx: usize,
        rng: &mut RandomGenerator,
    ) -> genky::Result<()> {
        match self.channel {
            Channel::KLambda => Self::decay_lambda(event, baryon_idx, rng),
            Channel::KSigma => {
                let sigma = event.track(baryon_idx).clone();
                let products = decay::sigma0_decay(&sigma.momentum, rng)?;
                let (lambda_idx, _) = event.decay(
                    baryon_idx,
                    (Particle::Lambda, Particle::Photon),
                    products,
                    sigma.vertex,
                );
                Self::decay_lambda(event, lambda_idx, rng)
            }
            Channel::Pi0P => {
                let pi0 = event.track(meson_idx).clone();
                let products = decay::pi0_decay(&pi0.momentum, rng)?;
                event.decay(
                    meson_idx,
                    (Particle::Photon, Particle::Photon),
                    products,
                    pi0.vertex,
                );
                Ok(())
            }
            Channel::PiN => Ok(()),
        }
    }

    /// Decay a Λ of an event into a proton and a π⁻ at a displaced vertex
    fn decay_lambda(event: &mut Event, lambda_idx: usize, rng: &mut RandomGenerator) -> genky::Result<()> {
        let lambda = event.track(lambda_idx).clone();
        let decay = decay::lambda_decay(&lambda.momentum, &lambda.vertex, rng)?;
        tracing::trace!(length = decay.length, "Λ decay");
        event.decay(
            lambda_idx,
            (Particle::Proton, Particle::PiMinus),
            decay.products,
            decay.vertex,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genky::{momentum::E, FourMomentum, Momentum};
    use nalgebra::Vector3;

    fn configuration(channel: Channel, decay: bool) -> Configuration {
        Configuration {
            channel,
            e_beam: 10.6,
            q2_min: 0.05,
            q2_max: 5.,
            w_min: 1.,
            w_max: 4.,
            num_events: 100,
            vz_min: -5.,
            vz_max: 0.,
            seed: 1,
            decay,
            output_file: String::new(),
        }
    }

    #[test]
    fn events_conserve_four_momentum() {
        let cfg = configuration(Channel::KLambda, false);
        let evgen = EventGenerator::new(&cfg);
        let mut rng = RandomGenerator::new(cfg.seed);
        for _ in 0..200 {
            let (event, _) = evgen.generate(&mut rng).unwrap();
            let total = event
                .tracks()
                .iter()
                .fold(Momentum::zeros(), |acc, track| acc + track.momentum);
            let expected = Particle::Proton.mass() + cfg.e_beam;
            assert!((total[E] - expected).abs() < 1e-8);
            assert!((total.spatial() - Vector3::new(0., 0., cfg.e_beam)).norm() < 1e-8);
            assert!(event.w >= Channel::KLambda.threshold());
        }
    }

    #[test]
    fn ksigma_decay_chain() {
        let cfg = configuration(Channel::KSigma, true);
        let evgen = EventGenerator::new(&cfg);
        let mut rng = RandomGenerator::new(cfg.seed);
        let (event, _) = evgen.generate(&mut rng).unwrap();
        let species = event
            .tracks()
            .iter()
            .map(|track| track.particle)
            .collect::<Vec<_>>();
        assert_eq!(
            species,
            vec![
                Particle::Electron,
                Particle::KaonPlus,
                Particle::SigmaZero,
                Particle::Lambda,
                Particle::Photon,
                Particle::Proton,
                Particle::PiMinus,
            ]
        );
        let active = event.tracks().iter().filter(|track| track.active).count();
        assert_eq!(active, 5);

        // The Λ decays downstream of the primary vertex
        let primary = event.track(0).vertex;
        assert!((-5. ..=0.).contains(&primary.z));
        let lambda = event.track(3);
        let proton = event.track(5);
        assert_eq!(proton.parent, Some(3));
        let flight = proton.vertex - lambda.vertex;
        assert!(flight.dot(&lambda.momentum.spatial()) >= 0.);
    }

    #[test]
    fn generation_is_reproducible() {
        let cfg = configuration(Channel::Pi0P, true);
        let evgen = EventGenerator::new(&cfg);
        let mut rng1 = RandomGenerator::new(99);
        let mut rng2 = RandomGenerator::new(99);
        for _ in 0..20 {
            assert_eq!(evgen.generate(&mut rng1), evgen.generate(&mut rng2));
        }
    }
}
