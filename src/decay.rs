//! Two-body decays of unstable reaction products
//!
//! Every decay follows the same pattern: pick an isotropic direction in the
//! rest frame of the parent, share the parent mass between the daughters
//! according to two-body kinematics, emit them back-to-back along that
//! direction, and boost both with the lab-frame velocity of the parent.
//!
//! Each decay consumes exactly two uniform draws from the supplied random
//! source, in this order: the cosine of the polar angle in [-1, 1), then the
//! azimuth in [0, 2π). Decays with a lifetime model consume one extra
//! exponential draw for the flight length.

use crate::{
    constants::{Particle, C_TAU_LAMBDA},
    error::Result,
    frame::two_body_split,
    momentum::{self, check_subluminal, FourMomentum, Momentum, Vector3F},
    numeric::{reals::consts::PI, Float},
    random::RandomSource,
};
use prefix_num_ops::real::*;

/// Position of an interaction or decay vertex (cm)
pub type Vertex = Vector3F;

/// Lab-frame 4-momenta of the daughters of a two-body decay
#[derive(Clone, Debug, PartialEq)]
pub struct DecayProducts {
    /// First daughter
    pub first: Momentum,

    /// Second daughter
    pub second: Momentum,
}

/// Outcome of the decay of a particle which flies before decaying
#[derive(Clone, Debug, PartialEq)]
pub struct DisplacedDecay {
    /// Decay daughters
    pub products: DecayProducts,

    /// Position of the decay vertex
    pub vertex: Vertex,

    /// Distance flown by the parent between production and decay
    pub length: Float,
}

/// Back-to-back daughters in the parent rest frame, along an isotropically
/// sampled direction
fn rest_frame_pair(
    m_parent: Float,
    m1: Float,
    m2: Float,
    rng: &mut impl RandomSource,
) -> Result<(Momentum, Momentum)> {
    let (e1, e2, p) = two_body_split(m_parent, m1, m2)?;
    let cos_theta = rng.uniform(-1., 1.);
    let phi = rng.uniform(0., 2. * PI);
    let sin_theta = sqrt(1. - cos_theta * cos_theta);
    let dir = Vector3F::new(sin_theta * cos(phi), sin_theta * sin(phi), cos_theta);
    let first = momentum::cartesian(p * dir.x, p * dir.y, p * dir.z, e1);
    let second = momentum::cartesian(-p * dir.x, -p * dir.y, -p * dir.z, e2);
    Ok((first, second))
}

/// Velocity of a parent particle, checked to be subluminal
fn parent_velocity(parent: &Momentum) -> Result<Vector3F> {
    let beta = parent.boost_vector();
    check_subluminal(&beta)?;
    Ok(beta)
}

/// Isotropic decay of a parent of nominal mass `m_parent` into daughters of
/// masses `m1` and `m2`
pub fn two_body_decay(
    parent: &Momentum,
    m_parent: Float,
    m1: Float,
    m2: Float,
    rng: &mut impl RandomSource,
) -> Result<DecayProducts> {
    let beta = parent_velocity(parent)?;
    let (first, second) = rest_frame_pair(m_parent, m1, m2, rng)?;
    Ok(DecayProducts {
        first: first.boosted(&beta),
        second: second.boosted(&beta),
    })
}

/// Isotropic decay into two daughters of mass `m_daughter`, each carrying
/// half of the parent mass as energy in the rest frame
pub fn equal_mass_decay(
    parent: &Momentum,
    m_parent: Float,
    m_daughter: Float,
    rng: &mut impl RandomSource,
) -> Result<DecayProducts> {
    two_body_decay(parent, m_parent, m_daughter, m_daughter, rng)
}

/// Isotropic decay of a particle of proper decay length `c_tau`, produced
/// at `production`
///
/// The flight length is exponentially distributed with mean cτ·γ·β and the
/// decay vertex lies along the parent momentum.
///
#[allow(clippy::too_many_arguments)]
pub fn displaced_decay(
    parent: &Momentum,
    m_parent: Float,
    m1: Float,
    m2: Float,
    c_tau: Float,
    production: &Vertex,
    rng: &mut impl RandomSource,
) -> Result<DisplacedDecay> {
    let products = two_body_decay(parent, m_parent, m1, m2, rng)?;
    let mean_length = c_tau * parent.gamma() * parent.beta();
    let length = rng.exponential(mean_length);
    let direction = parent.spatial();
    let norm = direction.norm();
    let vertex = if norm > 0. {
        production + direction * (length / norm)
    } else {
        *production
    };
    tracing::trace!(length, mean_length, "Displaced decay vertex");
    Ok(DisplacedDecay {
        products,
        vertex,
        length,
    })
}

/// π⁰ → γγ
pub fn pi0_decay(parent: &Momentum, rng: &mut impl RandomSource) -> Result<DecayProducts> {
    equal_mass_decay(
        parent,
        Particle::PiZero.mass(),
        Particle::Photon.mass(),
        rng,
    )
}

/// Weak decay Λ → p π⁻, with a displaced decay vertex
///
/// The daughters are the proton and the π⁻, in this order.
///
pub fn lambda_decay(
    parent: &Momentum,
    production: &Vertex,
    rng: &mut impl RandomSource,
) -> Result<DisplacedDecay> {
    displaced_decay(
        parent,
        Particle::Lambda.mass(),
        Particle::Proton.mass(),
        Particle::PiMinus.mass(),
        C_TAU_LAMBDA,
        production,
        rng,
    )
}

/// Electromagnetic decay Σ⁰ → Λ γ
///
/// The daughters are the Λ and the photon, in this order. The Σ⁰ lifetime
/// is negligible, so the decay happens at the production vertex.
///
/// With the `legacy-sigma-decay` feature, the photon is boosted with the
/// lab-frame velocity of the Λ rather than that of the Σ⁰, which reproduces
/// the events of the historical generator but violates momentum conservation.
///
pub fn sigma0_decay(parent: &Momentum, rng: &mut impl RandomSource) -> Result<DecayProducts> {
    let beta = parent_velocity(parent)?;
    let (lambda, photon) = rest_frame_pair(
        Particle::SigmaZero.mass(),
        Particle::Lambda.mass(),
        Particle::Photon.mass(),
        rng,
    )?;
    let lambda = lambda.boosted(&beta);
    let photon_beta = if cfg!(feature = "legacy-sigma-decay") {
        lambda.boost_vector()
    } else {
        beta
    };
    Ok(DecayProducts {
        first: lambda,
        second: photon.boosted(&photon_beta),
    })
}

/// Strong decay Λ(1520) → p K⁻
///
/// The daughters are the proton and the K⁻, in this order.
///
pub fn lambda1520_decay(parent: &Momentum, rng: &mut impl RandomSource) -> Result<DecayProducts> {
    two_body_decay(
        parent,
        Particle::Lambda1520.mass(),
        Particle::Proton.mass(),
        Particle::KaonMinus.mass(),
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::KinematicsError, momentum::E, random::RandGenerator};
    use approx::assert_relative_eq;

    /// Random source which records the requested draws
    struct RecordingSource {
        inner: RandGenerator,
        uniform_ranges: Vec<(Float, Float)>,
        exponential_means: Vec<Float>,
    }
    //
    impl RecordingSource {
        fn new() -> Self {
            Self {
                inner: RandGenerator::new(2024),
                uniform_ranges: Vec::new(),
                exponential_means: Vec::new(),
            }
        }
    }
    //
    impl RandomSource for RecordingSource {
        fn uniform(&mut self, lo: Float, hi: Float) -> Float {
            self.uniform_ranges.push((lo, hi));
            self.inner.uniform(lo, hi)
        }

        fn exponential(&mut self, mean: Float) -> Float {
            self.exponential_means.push(mean);
            self.inner.exponential(mean)
        }
    }

    /// Build a 4-momentum of given mass and 3-momentum
    fn on_shell(mass: Float, px: Float, py: Float, pz: Float) -> Momentum {
        let e = sqrt(mass * mass + px * px + py * py + pz * pz);
        momentum::cartesian(px, py, pz, e)
    }

    #[test]
    fn draws_are_consumed_in_order() {
        let mut rng = RecordingSource::new();
        let parent = on_shell(Particle::Lambda1520.mass(), 0.2, 0.1, 1.5);
        lambda1520_decay(&parent, &mut rng).unwrap();
        assert_eq!(rng.uniform_ranges, vec![(-1., 1.), (0., 2. * PI)]);
        assert!(rng.exponential_means.is_empty());

        let parent = on_shell(Particle::Lambda.mass(), 0., 0.6, 0.8);
        lambda_decay(&parent, &Vertex::zeros(), &mut rng).unwrap();
        assert_eq!(rng.uniform_ranges.len(), 4);
        assert_eq!(rng.exponential_means.len(), 1);
        let expected_mean = C_TAU_LAMBDA * parent.rho() / Particle::Lambda.mass();
        assert_relative_eq!(rng.exponential_means[0], expected_mean, epsilon = 1e-9);
    }

    #[test]
    fn daughters_are_back_to_back_in_rest_frame() {
        let mut rng = RandGenerator::new(1);
        let (m, m1, m2) = (1.8, 0.5, 0.9);
        let parent = on_shell(m, -0.4, 1.1, 2.3);
        for _ in 0..100 {
            let products = two_body_decay(&parent, m, m1, m2, &mut rng).unwrap();
            assert_relative_eq!(products.first.mass(), m1, epsilon = 1e-9);
            assert_relative_eq!(products.second.mass(), m2, epsilon = 1e-9);

            let back = -parent.boost_vector();
            let first = products.first.boosted(&back);
            let second = products.second.boosted(&back);
            assert_relative_eq!(first.spatial(), -second.spatial(), epsilon = 1e-9);
            assert_relative_eq!(first[E] + second[E], m, epsilon = 1e-9);
            assert_relative_eq!(products.first + products.second, parent, epsilon = 1e-9);
        }
    }

    #[test]
    fn pi0_photons_share_the_mass() {
        let mut rng = RandGenerator::new(3);
        let m = Particle::PiZero.mass();
        let parent = on_shell(m, 0.3, 0.3, 0.9);
        let products = pi0_decay(&parent, &mut rng).unwrap();
        for photon in [products.first, products.second] {
            assert_relative_eq!(photon[E], photon.rho(), epsilon = 1e-12);
            let rest = photon.boosted(&-parent.boost_vector());
            assert_relative_eq!(rest[E], m / 2., epsilon = 1e-12);
        }
    }

    #[test]
    fn equal_mass_daughters() {
        let mut rng = RandGenerator::new(10);
        let (m, m_daughter) = (0.547862, Particle::PiZero.mass());
        let parent = on_shell(m, 0.4, -0.3, 1.2);
        let products = equal_mass_decay(&parent, m, m_daughter, &mut rng).unwrap();
        for daughter in [products.first, products.second] {
            assert_relative_eq!(daughter.mass(), m_daughter, epsilon = 1e-9);
            let rest = daughter.boosted(&-parent.boost_vector());
            assert_relative_eq!(rest[E], m / 2., epsilon = 1e-9);
        }
    }

    #[test]
    fn nan_parent_mass_is_an_error() {
        let mut rng = RandGenerator::new(11);
        let parent = on_shell(1., 0., 0., 1.);
        assert!(matches!(
            two_body_decay(&parent, Float::NAN, 0.1, 0.1, &mut rng),
            Err(KinematicsError::BelowThreshold { .. })
        ));
    }

    #[test]
    fn decay_below_threshold_is_an_error() {
        let mut rng = RandGenerator::new(4);
        let parent = on_shell(0.2, 0., 0., 1.);
        assert_eq!(
            two_body_decay(&parent, 0.2, 0.14, 0.14, &mut rng),
            Err(KinematicsError::BelowThreshold {
                mass: 0.2,
                threshold: 0.28
            })
        );
    }

    #[test]
    fn spacelike_parent_is_an_error() {
        let mut rng = RandGenerator::new(5);
        let parent = momentum::cartesian(0., 0., 2., 1.);
        assert!(matches!(
            pi0_decay(&parent, &mut rng),
            Err(KinematicsError::Superluminal(_))
        ));
    }

    #[test]
    fn lambda_at_rest_decays_in_place() {
        let mut rng = RandGenerator::new(6);
        let parent = on_shell(Particle::Lambda.mass(), 0., 0., 0.);
        let production = Vertex::new(1., 2., -3.);
        let decay = lambda_decay(&parent, &production, &mut rng).unwrap();
        assert_eq!(decay.length, 0.);
        assert_eq!(decay.vertex, production);
        let total = decay.products.first + decay.products.second;
        assert_relative_eq!(total, parent, epsilon = 1e-9);
    }

    #[test]
    fn lambda_vertex_follows_momentum() {
        let mut rng = RandGenerator::new(7);
        let parent = on_shell(Particle::Lambda.mass(), 0.3, -0.2, 2.);
        let production = Vertex::new(0.1, 0.2, -5.);
        let decay = lambda_decay(&parent, &production, &mut rng).unwrap();
        let flight = decay.vertex - production;
        assert_relative_eq!(flight.norm(), decay.length, epsilon = 1e-9);
        assert_relative_eq!(
            flight.normalize(),
            parent.spatial().normalize(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn sigma0_products() {
        let mut rng = RandGenerator::new(8);
        let parent = on_shell(Particle::SigmaZero.mass(), -0.5, 0.2, 1.7);
        let products = sigma0_decay(&parent, &mut rng).unwrap();
        assert_relative_eq!(products.first.mass(), Particle::Lambda.mass(), epsilon = 1e-9);
        assert_relative_eq!(products.second[E], products.second.rho(), epsilon = 1e-12);
        if cfg!(not(feature = "legacy-sigma-decay")) {
            let total = products.first + products.second;
            assert_relative_eq!(total, parent, epsilon = 1e-9);
        }
    }

    #[test]
    fn lambda1520_products() {
        let mut rng = RandGenerator::new(9);
        let parent = on_shell(Particle::Lambda1520.mass(), 0.1, 0.1, 3.);
        let products = lambda1520_decay(&parent, &mut rng).unwrap();
        assert_relative_eq!(products.first.mass(), Particle::Proton.mass(), epsilon = 1e-9);
        assert_relative_eq!(products.second.mass(), Particle::KaonMinus.mass(), epsilon = 1e-9);
    }
}
