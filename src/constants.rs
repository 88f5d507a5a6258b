//! Physical constants and particle properties shared by all kinematics code
//!
//! Masses are in GeV, lengths in cm. The values follow the ones historically
//! used by the KY/single-pion electroproduction generator, so that generated
//! events can be compared with older productions.

use crate::numeric::{reals::consts::PI, Float};

/// Proton mass
pub const M_PROTON: Float = 0.9383;

/// Fine structure constant
pub const ALPHA: Float = 1. / 137.035_999;

/// Proper decay length of the Λ hyperon (cm)
pub const C_TAU_LAMBDA: Float = 7.89;

/// Prefactor of the virtual photon flux, 𝛼/(2𝜋²)
pub const FLUX_PREFACTOR: Float = ALPHA / (2. * PI * PI);

/// Particles which can appear in generated events
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Particle {
    Electron,
    Proton,
    Neutron,
    PiZero,
    PiPlus,
    PiMinus,
    KaonPlus,
    KaonMinus,
    Lambda,
    SigmaZero,
    Lambda1520,
    Photon,
}
//
impl Particle {
    /// Rest mass
    pub const fn mass(self) -> Float {
        match self {
            Particle::Electron => 0.000_511,
            Particle::Proton => M_PROTON,
            Particle::Neutron => 0.939_565,
            Particle::PiZero => 0.134_977,
            Particle::PiPlus | Particle::PiMinus => 0.139_570_39,
            Particle::KaonPlus | Particle::KaonMinus => 0.493_677,
            Particle::Lambda => 1.115_683,
            Particle::SigmaZero => 1.192_642,
            Particle::Lambda1520 => 1.519_5,
            Particle::Photon => 0.,
        }
    }

    /// Electric charge, in units of the positron charge
    pub const fn charge(self) -> i32 {
        match self {
            Particle::Electron | Particle::PiMinus | Particle::KaonMinus => -1,
            Particle::Proton | Particle::PiPlus | Particle::KaonPlus => 1,
            Particle::Neutron
            | Particle::PiZero
            | Particle::Lambda
            | Particle::SigmaZero
            | Particle::Lambda1520
            | Particle::Photon => 0,
        }
    }

    /// Particle code used in LUND records (PDG numbering scheme)
    pub const fn lund_id(self) -> i32 {
        match self {
            Particle::Electron => 11,
            Particle::Proton => 2212,
            Particle::Neutron => 2112,
            Particle::PiZero => 111,
            Particle::PiPlus => 211,
            Particle::PiMinus => -211,
            Particle::KaonPlus => 321,
            Particle::KaonMinus => -321,
            Particle::Lambda => 3122,
            Particle::SigmaZero => 3212,
            Particle::Lambda1520 => 3124,
            Particle::Photon => 22,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decays_are_kinematically_open() {
        use Particle::*;
        assert!(Lambda.mass() > Proton.mass() + PiMinus.mass());
        assert!(SigmaZero.mass() > Lambda.mass() + Photon.mass());
        assert!(Lambda1520.mass() > Proton.mass() + KaonMinus.mass());
    }

    #[test]
    fn antiparticles_have_opposite_codes() {
        assert_eq!(Particle::PiPlus.lund_id(), -Particle::PiMinus.lund_id());
        assert_eq!(Particle::KaonPlus.lund_id(), -Particle::KaonMinus.lund_id());
        assert_eq!(Particle::PiPlus.charge(), -Particle::PiMinus.charge());
    }
}
