//! Error types of the kinematics engine

use crate::numeric::Float;
use thiserror::Error;

/// Result type for kinematics operations
pub type Result<T> = std::result::Result<T, KinematicsError>;

/// Errors that can occur while computing reaction or decay kinematics
///
/// None of these are fatal by themselves: the event driver decides whether
/// an error aborts the run or merely causes an event to be re-sampled.
///
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Invariant mass is too small to produce the requested final state
    #[error("Invariant mass {mass} GeV is below the {threshold} GeV two-body threshold")]
    BelowThreshold { mass: Float, threshold: Float },

    /// The virtual photon would carry all of (or more than) the beam energy
    #[error("Virtual photon energy {omega} GeV is not below the beam energy {e_beam} GeV")]
    PhotonEnergyTooHigh { omega: Float, e_beam: Float },

    /// The virtual photon carries no energy in the lab frame
    #[error("Virtual photon energy vanishes at Q² = {q2} GeV², W = {w} GeV")]
    VanishingPhotonEnergy { q2: Float, w: Float },

    /// Momentum transfer must be spacelike
    #[error("Negative Q² = {0} GeV²")]
    NegativeQ2(Float),

    /// A cosine computed from the kinematics fell outside of [-1, 1]
    #[error("Unphysical {what} cosine: {cosine}")]
    UnphysicalCosine { what: &'static str, cosine: Float },

    /// A boost velocity reached or exceeded the speed of light
    #[error("Superluminal boost velocity |β| = {0}")]
    Superluminal(Float),

    /// The reaction channel name is not one of the supported ones
    #[error("Unknown reaction channel '{0}', expected KLambda, KSigma, Pi0P or PiN")]
    UnknownChannel(String),

    /// Lab azimuth outside of [-180°, 180°]
    #[error("Lab azimuth {0}° is outside of [-180°, 180°]")]
    AzimuthOutOfRange(Float),

    /// Sector folding produced a local azimuth outside of [-30°, 30°]
    #[error("Sector-local azimuth {local}° (from {phi}°) is outside of [-30°, 30°]")]
    SectorAzimuthOutOfRange { phi: Float, local: Float },
}
