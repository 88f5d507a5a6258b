//! This module implements some domain-specific 4-momentum handling logic.

use crate::{
    error::{KinematicsError, Result},
    numeric::Float,
};
use nalgebra::{Rotation3, SVector, Vector3};
use prefix_num_ops::real::*;

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Spatial 3-vector (momenta, velocities, positions)
pub type Vector3F = Vector3<Float>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Build a 4-momentum from its cartesian components
pub fn cartesian(px: Float, py: Float, pz: Float, e: Float) -> Momentum {
    Momentum::new(px, py, pz, e)
}

/// Build a 4-momentum from its energy and the spherical coordinates
/// (magnitude, polar angle, azimuth) of its 3-momentum
pub fn polar(e: Float, rho: Float, theta: Float, phi: Float) -> Momentum {
    let sin_theta = sin(theta);
    Momentum::new(
        rho * sin_theta * cos(phi),
        rho * sin_theta * sin(phi),
        rho * cos(theta),
        e,
    )
}

/// Relativistic operations on 4-momenta
pub trait FourMomentum {
    /// Spatial part of the 4-vector
    fn spatial(&self) -> Vector3F;

    /// Norm of the 3-momentum
    fn rho(&self) -> Float;

    /// Invariant mass, negative for spacelike vectors
    fn mass(&self) -> Float;

    /// Polar angle of the 3-momentum, in [0, π]
    fn theta(&self) -> Float;

    /// Azimuth of the 3-momentum, in (-π, π]
    fn phi(&self) -> Float;

    /// Velocity of the particle, i.e. the boost from its rest frame
    fn boost_vector(&self) -> Vector3F;

    /// Norm of the velocity
    fn beta(&self) -> Float;

    /// Lorentz factor
    fn gamma(&self) -> Float;

    /// Apply an active Lorentz boost of velocity `beta`
    fn boost(&mut self, beta: &Vector3F);

    /// Apply a spatial rotation to the 3-momentum
    fn rotate(&mut self, rotation: &Rotation3<Float>);

    /// Boosted copy of this 4-vector
    fn boosted(&self, beta: &Vector3F) -> Self;

    /// Rotated copy of this 4-vector
    fn rotated(&self, rotation: &Rotation3<Float>) -> Self;
}

impl FourMomentum for Momentum {
    fn spatial(&self) -> Vector3F {
        self.fixed_rows::<3>(X).into_owned()
    }

    fn rho(&self) -> Float {
        self.spatial().norm()
    }

    fn mass(&self) -> Float {
        let m2 = self[E] * self[E] - self.spatial().norm_squared();
        if m2 < 0. {
            -sqrt(-m2)
        } else {
            sqrt(m2)
        }
    }

    fn theta(&self) -> Float {
        let (xy, z) = (self[X].hypot(self[Y]), self[Z]);
        if xy == 0. && z == 0. {
            0.
        } else {
            xy.atan2(z)
        }
    }

    fn phi(&self) -> Float {
        if self[X] == 0. && self[Y] == 0. {
            0.
        } else {
            self[Y].atan2(self[X])
        }
    }

    fn boost_vector(&self) -> Vector3F {
        self.spatial() / self[E]
    }

    fn beta(&self) -> Float {
        self.rho() / self[E]
    }

    fn gamma(&self) -> Float {
        1. / sqrt(1. - self.beta().powi(2))
    }

    fn boost(&mut self, beta: &Vector3F) {
        let b2 = beta.norm_squared();
        let gamma = 1. / sqrt(1. - b2);
        let bp = beta.dot(&self.spatial());
        let gamma2 = if b2 > 0. { (gamma - 1.) / b2 } else { 0. };
        let p = self.spatial() + (gamma2 * bp + gamma * self[E]) * beta;
        let e = gamma * (self[E] + bp);
        self.fixed_rows_mut::<3>(X).copy_from(&p);
        self[E] = e;
    }

    fn rotate(&mut self, rotation: &Rotation3<Float>) {
        let p = rotation * self.spatial();
        self.fixed_rows_mut::<3>(X).copy_from(&p);
    }

    fn boosted(&self, beta: &Vector3F) -> Self {
        let mut result = *self;
        result.boost(beta);
        result
    }

    fn rotated(&self, rotation: &Rotation3<Float>) -> Self {
        let mut result = *self;
        result.rotate(rotation);
        result
    }
}

/// Check that a boost velocity is strictly subluminal
pub fn check_subluminal(beta: &Vector3F) -> Result<()> {
    let norm = beta.norm();
    if norm < 1. {
        Ok(())
    } else {
        Err(KinematicsError::Superluminal(norm))
    }
}
