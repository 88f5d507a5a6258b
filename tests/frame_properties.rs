//! Property checks of the CM <-> lab transformations over the physical domain

use genky::{
    constants::{Particle, M_PROTON},
    frame::{cms2lab, lab2cms, scattered_lepton},
    momentum::{cartesian, E},
    numeric::{reals::consts::PI, Float},
    Channel, FourMomentum, Momentum,
};
use proptest::prelude::*;

/// Physical reaction point of e p -> e' K⁺ Λ
fn reaction_point() -> impl Strategy<Value = (Float, Float, Float, Float, Float, Float)> {
    let threshold = Channel::KLambda.threshold();
    (
        8.0..11.0,
        0.1..3.0,
        (threshold + 0.05)..3.0,
        0.0..(2. * PI),
        0.05..(PI - 0.05),
        0.01..(2. * PI - 0.01),
    )
}

/// Lab-frame scattered lepton, K⁺ and Λ of a reaction point
fn products(
    e_beam: Float,
    q2: Float,
    w: Float,
    phi: Float,
    theta_k: Float,
    phi_k: Float,
) -> (Momentum, Momentum, Momentum) {
    let pe = scattered_lepton(q2, w, phi, e_beam).unwrap();
    let (pk, pl) = cms2lab(
        w,
        q2,
        phi,
        e_beam,
        theta_k,
        phi_k,
        Particle::KaonPlus.mass(),
        Particle::Lambda.mass(),
    )
    .unwrap();
    (pe, pk, pl)
}

proptest! {
    #[test]
    fn products_are_on_mass_shell((e_beam, q2, w, phi, theta_k, phi_k) in reaction_point()) {
        let (_, pk, pl) = products(e_beam, q2, w, phi, theta_k, phi_k);
        prop_assert!((pk.mass() - Particle::KaonPlus.mass()).abs() < 1e-6);
        prop_assert!((pl.mass() - Particle::Lambda.mass()).abs() < 1e-6);
    }

    #[test]
    fn four_momentum_is_conserved((e_beam, q2, w, phi, theta_k, phi_k) in reaction_point()) {
        let (pe, pk, pl) = products(e_beam, q2, w, phi, theta_k, phi_k);
        let initial = cartesian(0., 0., e_beam, e_beam + M_PROTON);
        let difference = initial - (pe + pk + pl);
        prop_assert!(difference.norm() < 1e-8, "difference: {}", difference);
    }

    #[test]
    fn lab2cms_inverts_cms2lab((e_beam, q2, w, phi, theta_k, phi_k) in reaction_point()) {
        let (pe, pk, pl) = products(e_beam, q2, w, phi, theta_k, phi_k);
        let cms = lab2cms(q2, e_beam, &pe, &pk, &pl).unwrap();
        prop_assert!((cms.theta - theta_k).abs() < 1e-6);
        prop_assert!((cms.phi - phi_k).abs() < 1e-6);

        // The hadronic system is at rest in the CM frame, with mass W
        let total = cms.p1 + cms.p2;
        prop_assert!(total.spatial().norm() < 1e-8);
        prop_assert!((total[E] - w).abs() < 1e-8);
        prop_assert!((total.mass() - w).abs() < 1e-8);
    }
}
