//! Transformations between the virtual photon-nucleon center-of-mass frame
//! and the laboratory frame, and the scalar kinematic invariants of the
//! electroproduction reaction
//!
//! All energies are in GeV. The beam travels along the lab Z axis and the
//! target nucleon is at rest in the lab.

use crate::{
    constants::{FLUX_PREFACTOR, M_PROTON},
    error::{KinematicsError, Result},
    momentum::{self, check_subluminal, FourMomentum, Momentum, Vector3F, E},
    numeric::{
        functions::sqr,
        reals::consts::{FRAC_PI_2, PI},
        Float,
    },
    rotation::{self, Rotation},
};
use prefix_num_ops::real::*;

/// Tolerance on cosines which are slightly out of [-1, 1] due to round-off
const COSINE_TOLERANCE: Float = 1e-12;

// ### SCALAR INVARIANTS ###

/// Energy of the virtual photon in the lab frame (ω)
///
/// Unphysical (non-positive) photon energies are clamped to zero.
///
pub fn omega(q2: Float, w: Float) -> Float {
    let om = (w * w + q2 - sqr(M_PROTON)) / (2. * M_PROTON);
    if om <= 0. {
        0.
    } else {
        om
    }
}

/// Energy of the virtual photon in the center-of-mass frame (ω*)
///
/// Unphysical (non-positive) photon energies are clamped to zero.
///
pub fn omega_star(q2: Float, w: Float) -> Float {
    let om_star = (w * w - q2 - sqr(M_PROTON)) / (2. * w);
    if om_star <= 0. {
        0.
    } else {
        om_star
    }
}

/// Equivalent real photon energy in Hand's convention, ω - Q²/(2mp)
pub fn photon_equivalent_energy(q2: Float, w: Float) -> Float {
    omega(q2, w) - q2 / (2. * M_PROTON)
}

/// Transverse polarization of the virtual photon (ε)
pub fn epsilon(e_beam: Float, q2: Float, w: Float) -> Result<Float> {
    let om = checked_omega(e_beam, q2, w)?;
    Ok(epsilon_impl(e_beam, q2, om))
}

/// Longitudinal polarization of the virtual photon, (√Q²/ω)·ε
///
/// Undefined when ω vanishes, which is reported as an error.
///
pub fn epsilon_l(e_beam: Float, q2: Float, w: Float) -> Result<Float> {
    let om = checked_omega(e_beam, q2, w)?;
    if om <= 0. {
        return Err(KinematicsError::VanishingPhotonEnergy { q2, w });
    }
    Ok(sqrt(q2) / om * epsilon_impl(e_beam, q2, om))
}

/// Virtual photon flux (Γ)
///
/// The flux vanishes outside of the domain where the photon energy lies
/// between zero and the beam energy, and for real photons (Q² = 0).
///
pub fn flux(e_beam: Float, q2: Float, w: Float) -> Float {
    let om = omega(q2, w);
    if q2.is_nan() || q2 <= 0. || om < 0. || om >= e_beam {
        return 0.;
    }
    let e_scattered = e_beam - om;
    FLUX_PREFACTOR
        * (e_scattered / e_beam)
        * (w * w - sqr(M_PROTON))
        / (2. * M_PROTON * q2)
        * (1. / (1. - epsilon_impl(e_beam, q2, om)))
}

/// Polarization formula, assuming that ω < Ebeam
fn epsilon_impl(e_beam: Float, q2: Float, om: Float) -> Float {
    1. / (1. + (2. * (q2 + om * om)) / (4. * e_beam * (e_beam - om) - q2))
}

/// Compute ω, checking that the scattered lepton keeps some energy
fn checked_omega(e_beam: Float, q2: Float, w: Float) -> Result<Float> {
    if q2 < 0. {
        return Err(KinematicsError::NegativeQ2(q2));
    }
    let om = omega(q2, w);
    if om >= e_beam {
        return Err(KinematicsError::PhotonEnergyTooHigh { omega: om, e_beam });
    }
    Ok(om)
}

/// Arc cosine which reports out-of-range arguments instead of returning NaN
fn checked_acos(what: &'static str, cosine: Float) -> Result<Float> {
    if abs(cosine) > 1. + COSINE_TOLERANCE || cosine.is_nan() {
        return Err(KinematicsError::UnphysicalCosine { what, cosine });
    }
    Ok(cosine.clamp(-1., 1.).acos())
}

// ### LEPTON SIDE ###

/// Lab-frame polar angle of the scattered lepton, from the momentum transfer
/// relation Q² = 2·Ebeam·E'·(1 - cos θ)
fn lepton_theta(e_beam: Float, q2: Float, om: Float) -> Result<Float> {
    checked_acos("scattered lepton", 1. - q2 / (2. * e_beam * (e_beam - om)))
}

/// Lab-frame polar angle of the virtual photon, from momentum conservation
fn photon_theta(e_beam: Float, q2: Float, om: Float) -> Result<Float> {
    checked_acos(
        "virtual photon",
        (q2 + 2. * e_beam * om) / (2. * e_beam * sqrt(q2 + om * om)),
    )
}

/// Lab-frame azimuth of the virtual photon, opposite to the lepton azimuth
fn photon_phi(phi: Float) -> Float {
    if phi < PI {
        phi + PI
    } else {
        phi - PI
    }
}

/// Unit vector from spherical angles
fn direction(theta: Float, phi: Float) -> Vector3F {
    momentum::polar(0., 1., theta, phi).spatial()
}

/// Four-momentum of the scattered lepton in the lab frame
///
/// The lepton is treated as massless, with energy Ebeam - ω, a polar angle
/// given by the Q² relation and azimuth `phi`.
///
pub fn scattered_lepton(q2: Float, w: Float, phi: Float, e_beam: Float) -> Result<Momentum> {
    let om = checked_omega(e_beam, q2, w)?;
    let e_scattered = e_beam - om;
    let theta = lepton_theta(e_beam, q2, om)?;
    Ok(momentum::polar(e_scattered, e_scattered, theta, phi))
}

// ### CM -> LAB ###

/// Rest-frame energies and momentum of a two-body system of mass `m_parent`
///
/// Fails if the parent is too light to produce the two daughters, or if it
/// has no positive mass at all.
///
pub fn two_body_split(m_parent: Float, m1: Float, m2: Float) -> Result<(Float, Float, Float)> {
    let threshold = m1 + m2;
    if m_parent.is_nan() || m_parent < threshold || m_parent <= 0. {
        return Err(KinematicsError::BelowThreshold {
            mass: m_parent,
            threshold,
        });
    }
    let m_parent2 = m_parent * m_parent;
    let e1 = (m_parent2 + m1 * m1 - m2 * m2) / (2. * m_parent);
    let e2 = (m_parent2 + m2 * m2 - m1 * m1) / (2. * m_parent);
    // Rounding may make this slightly negative exactly at threshold
    let p = sqrt((e1 * e1 - m1 * m1).max(0.));
    Ok((e1, e2, p))
}

/// Compute the lab-frame 4-momenta of the two reaction products
///
/// Particle 1 is emitted at angles (`theta_k`, `phi_k`) in the photon-nucleon
/// center-of-mass frame, whose Z axis is the virtual photon direction and
/// whose Y axis is normal to the lepton scattering plane. Particle 2 is
/// emitted back-to-back. The lepton scatters with azimuth `phi` in the lab.
///
/// Returns the lab-frame 4-momenta of particle 1 and particle 2.
///
#[allow(clippy::too_many_arguments)]
pub fn cms2lab(
    w: Float,
    q2: Float,
    phi: Float,
    e_beam: Float,
    theta_k: Float,
    phi_k: Float,
    m1: Float,
    m2: Float,
) -> Result<(Momentum, Momentum)> {
    // Check the kinematic domain before doing anything
    let (e1, e2, p) = two_body_split(w, m1, m2)?;
    let e_gamma = checked_omega(e_beam, q2, w)?;
    let theta_e = lepton_theta(e_beam, q2, e_gamma)?;
    let theta_gamma = photon_theta(e_beam, q2, e_gamma)?;

    // Two-body system in the CM frame, Z along the virtual photon
    let theta_2 = PI - theta_k;
    let phi_2 = if phi_k + PI > 2. * PI {
        phi_k - PI
    } else {
        phi_k + PI
    };
    let mut p1 = momentum::polar(e1, p, theta_k, phi_k);
    let mut p2 = momentum::polar(e2, p, theta_2, phi_2);

    // Boost along the virtual photon into the lab frame. Axes are still
    // aligned with the photon at this point.
    let beta = Vector3F::new(0., 0., sqrt(e_gamma * e_gamma + q2) / (e_gamma + M_PROTON));
    check_subluminal(&beta)?;
    p1.boost(&beta);
    p2.boost(&beta);

    // Directions of the scattered lepton and virtual photon in the lab frame
    let lepton = direction(theta_e, phi);
    let photon = direction(theta_gamma, photon_phi(phi));

    // Photon-aligned axes expressed in the lab frame: Z along the photon, Y
    // normal to the scattering plane, X in the scattering plane
    let axis_y = scattering_normal(&photon, &lepton, phi);
    let axis_x = axis_y.cross(&photon).normalize();

    // Rotate the photon-aligned frame into the lab frame
    let (angle1, angle2, angle3) = rotation::triad_euler_angles(&axis_x, &axis_y, &photon);
    let rot = rotation::x_euler_angles(angle1, angle2, angle3);
    p1.rotate(&rot);
    p2.rotate(&rot);

    tracing::trace!(?p1, ?p2, "Reaction products in the lab frame");
    Ok((p1, p2))
}

/// Unit normal to the lepton scattering plane, photon × lepton
///
/// In the forward limit where both vectors are collinear with the beam, the
/// plane is set by the lepton azimuth.
///
fn scattering_normal(photon: &Vector3F, lepton: &Vector3F, phi: Float) -> Vector3F {
    let normal = photon.cross(lepton);
    let norm = normal.norm();
    if norm > Float::EPSILON * Float::EPSILON {
        normal / norm
    } else {
        Vector3F::new(-sin(phi), cos(phi), 0.)
    }
}

// ### LAB -> CM ###

/// Photon-nucleon center-of-mass frame, as reconstructed from lab-frame
/// lepton kinematics
///
/// Axes follow the same convention as in `cms2lab`.
///
#[derive(Clone, Debug)]
pub struct CmsFrame {
    /// Rotation from the lab axes to the photon-aligned axes
    rotation: Rotation,

    /// Boost from the photon-aligned lab frame to the CM frame
    boost: Vector3F,
}
//
impl CmsFrame {
    /// Reconstruct the CM frame from the momentum transfer, the beam energy
    /// and the scattered lepton 4-momentum
    pub fn new(q2: Float, e_beam: Float, pe_final: &Momentum) -> Result<Self> {
        if q2 < 0. {
            return Err(KinematicsError::NegativeQ2(q2));
        }
        let pe_initial = momentum::cartesian(0., 0., e_beam, e_beam);
        let photon = pe_initial - pe_final;

        // New Z along the photon, new X in the scattering plane
        let uz = photon.spatial().normalize();
        let normal = pe_initial.spatial().cross(&pe_final.spatial());
        let norm = normal.norm();
        let ux = if norm > 0. {
            normal / norm
        } else {
            Vector3F::y()
        };
        let ux = rotation::rotate_around(&ux, 3. * FRAC_PI_2, &uz);
        let rotation = rotation::from_z_axis(&uz, &ux).inverse();

        let e_gamma = photon[E];
        let boost = Vector3F::new(0., 0., -sqrt(e_gamma * e_gamma + q2) / (e_gamma + M_PROTON));
        check_subluminal(&boost)?;

        Ok(Self { rotation, boost })
    }

    /// Express a lab-frame 4-momentum in the CM frame
    pub fn to_cms(&self, p: &Momentum) -> Momentum {
        p.rotated(&self.rotation).boosted(&self.boost)
    }
}

/// Result of the lab -> CM transformation of a two-body hadronic system
#[derive(Clone, Debug)]
pub struct CmsKinematics {
    /// Polar angle of particle 1 in the CM frame, in [0, π]
    pub theta: Float,

    /// Azimuth of particle 1 in the CM frame, in [0, 2π)
    pub phi: Float,

    /// CM-frame 4-momentum of particle 1
    pub p1: Momentum,

    /// CM-frame 4-momentum of particle 2
    pub p2: Momentum,
}

/// Recover the CM-frame emission angles of particle 1 from lab-frame
/// 4-momenta of the scattered lepton and of both hadrons
pub fn lab2cms(
    q2: Float,
    e_beam: Float,
    pe_final: &Momentum,
    p1: &Momentum,
    p2: &Momentum,
) -> Result<CmsKinematics> {
    let frame = CmsFrame::new(q2, e_beam, pe_final)?;
    let p1 = frame.to_cms(p1);
    let p2 = frame.to_cms(p2);
    let phi = p1.phi();
    Ok(CmsKinematics {
        theta: p1.theta(),
        phi: if phi >= 0. { phi } else { phi + 2. * PI },
        p1,
        p2,
    })
}
