//! Kinematics engine of the KY / single-pion electroproduction generator
//!
//!
//! # Introduction (for the physicist)
//!
//! An electron beam scatters off a proton target at rest, exchanging a
//! virtual photon of virtuality Q². The photon-proton system, of invariant
//! mass W, produces a meson and a baryon (K⁺Λ, K⁺Σ⁰, π⁰p or π⁺n) which are
//! emitted back-to-back in the photon-proton center-of-mass frame.
//!
//! This crate computes where these particles go in the laboratory: it builds
//! the center-of-mass frame from the lepton kinematics, boosts and rotates
//! the reaction products into the lab, and lets unstable products decay,
//! including the displaced vertex of the weakly decaying Λ.
//!
//!
//! # Introduction (for the computer guy)
//!
//! Everything here is a pure function of its inputs, except for random
//! number draws, which come from a generator that the caller owns and passes
//! explicitly. Give each thread its own generator stream and event
//! generation parallelizes without any synchronization.
//!
//! Unphysical inputs are reported as `KinematicsError`s rather than turning
//! into NaNs, so that the driver can decide to re-sample or give up.

#![warn(missing_docs)]

pub mod constants;
pub mod decay;
pub mod error;
pub mod frame;
pub mod lookup;
pub mod momentum;
pub mod numeric;
pub mod random;
pub mod rotation;

pub use crate::{
    error::{KinematicsError, Result},
    lookup::{channel_code, sector_fold, Channel},
    momentum::{FourMomentum, Momentum},
    random::{RandGenerator, RandomSource},
};
