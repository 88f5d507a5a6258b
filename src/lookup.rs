//! Reaction channel names and detector sector folding

use crate::{
    constants::Particle,
    error::{KinematicsError, Result},
    numeric::Float,
};
use std::{fmt, str::FromStr};

/// Supported electroproduction channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// e p → e' K⁺ Λ
    KLambda,

    /// e p → e' K⁺ Σ⁰
    KSigma,

    /// e p → e' π⁰ p
    Pi0P,

    /// e p → e' π⁺ n
    PiN,
}
//
impl Channel {
    /// Numeric code of the channel, as used in configuration and output
    pub const fn code(self) -> u8 {
        match self {
            Channel::KLambda => 1,
            Channel::KSigma => 2,
            Channel::Pi0P => 3,
            Channel::PiN => 4,
        }
    }

    /// Name of the channel, as accepted by `channel_code`
    pub const fn name(self) -> &'static str {
        match self {
            Channel::KLambda => "KLambda",
            Channel::KSigma => "KSigma",
            Channel::Pi0P => "Pi0P",
            Channel::PiN => "PiN",
        }
    }

    /// Reaction products: the meson, then the baryon
    pub const fn products(self) -> (Particle, Particle) {
        match self {
            Channel::KLambda => (Particle::KaonPlus, Particle::Lambda),
            Channel::KSigma => (Particle::KaonPlus, Particle::SigmaZero),
            Channel::Pi0P => (Particle::PiZero, Particle::Proton),
            Channel::PiN => (Particle::PiPlus, Particle::Neutron),
        }
    }

    /// Minimal hadronic invariant mass W at which the channel opens
    pub fn threshold(self) -> Float {
        let (meson, baryon) = self.products();
        meson.mass() + baryon.mass()
    }
}

impl FromStr for Channel {
    type Err = KinematicsError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "KLambda" => Ok(Channel::KLambda),
            "KSigma" => Ok(Channel::KSigma),
            "Pi0P" => Ok(Channel::Pi0P),
            "PiN" => Ok(Channel::PiN),
            other => Err(KinematicsError::UnknownChannel(other.to_owned())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric code (1 to 4) of a channel name
pub fn channel_code(name: &str) -> Result<u8> {
    name.parse::<Channel>().map(Channel::code)
}

/// Number of azimuthal detector sectors
pub const NUM_SECTORS: usize = 6;

/// Fold a lab azimuth (degrees) into a detector sector
///
/// Sectors are 60° wide and sector 1 is centered on 0°. Returns the azimuth
/// relative to the sector center, in [-30°, 30°], and the sector number
/// (1 to 6). Azimuths on a sector boundary go to the first matching sector
/// in the order 1, 2, 3, 4 (upper half), 6, 5, 4 (lower half).
///
pub fn sector_fold(phi: Float) -> Result<(Float, u8)> {
    let in_range = |lo: Float, hi: Float| phi >= lo && phi <= hi;
    let (local, sector) = if in_range(-30., 30.) {
        (phi, 1)
    } else if in_range(30., 90.) {
        (phi - 60., 2)
    } else if in_range(90., 150.) {
        (phi - 120., 3)
    } else if in_range(150., 180.) {
        (phi - 180., 4)
    } else if in_range(-90., -30.) {
        (phi + 60., 6)
    } else if in_range(-150., -90.) {
        (phi + 120., 5)
    } else if in_range(-180., -150.) {
        (phi + 180., 4)
    } else {
        return Err(KinematicsError::AzimuthOutOfRange(phi));
    };
    if !(-30. ..=30.).contains(&local) {
        return Err(KinematicsError::SectorAzimuthOutOfRange { phi, local });
    }
    Ok((local, sector))
}
