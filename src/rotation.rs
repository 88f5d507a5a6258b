//! Construction of the spatial rotations used by frame transformations

use crate::{momentum::Vector3F, numeric::Float};
use nalgebra::{Matrix3, Rotation3, Unit};

/// Spatial rotation
pub type Rotation = Rotation3<Float>;

/// Build a rotation from Euler angles in the X-convention (Goldstein,
/// Landau-Lifshitz): rotate by `phi` around Z, then by `theta` around the
/// new X, then by `psi` around the new Z.
///
/// The resulting matrix is Rz(psi)·Rx(theta)·Rz(phi).
///
pub fn x_euler_angles(phi: Float, theta: Float, psi: Float) -> Rotation {
    let z_axis = Vector3F::z_axis();
    let x_axis = Vector3F::x_axis();
    Rotation::from_axis_angle(&z_axis, psi)
        * Rotation::from_axis_angle(&x_axis, theta)
        * Rotation::from_axis_angle(&z_axis, phi)
}

/// X-convention Euler angles of the rotation which maps the canonical basis
/// onto the orthonormal triad (x, y, z)
///
/// This is the inverse of `x_euler_angles` restricted to proper rotations.
/// When the new Z axis is (anti)parallel to the old one, only the sum of the
/// first and last angles is defined and it is carried by the last angle.
///
pub fn triad_euler_angles(x: &Vector3F, y: &Vector3F, z: &Vector3F) -> (Float, Float, Float) {
    let theta = z.z.clamp(-1., 1.).acos();
    if z.x == 0. && z.y == 0. {
        (0., theta, x.y.atan2(x.x))
    } else {
        (x.z.atan2(y.z), theta, z.x.atan2(-z.y))
    }
}

/// Build the rotation whose image of the Z axis is `new_z`, and which maps
/// the XZ plane onto the plane spanned by `new_z` and `xz_plane`
///
/// The columns of the resulting matrix are the new X, Y and Z axes.
///
pub fn from_z_axis(new_z: &Vector3F, xz_plane: &Vector3F) -> Rotation {
    let z = new_z.normalize();
    let y = z.cross(xz_plane).normalize();
    let x = y.cross(&z);
    Rotation::from_matrix_unchecked(Matrix3::from_columns(&[x, y, z]))
}

/// Rotate a 3-vector by `angle` around `axis`
pub fn rotate_around(v: &Vector3F, angle: Float, axis: &Vector3F) -> Vector3F {
    Rotation::from_axis_angle(&Unit::new_normalize(*axis), angle) * v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::reals::consts::{FRAC_PI_2, PI};
    use approx::assert_relative_eq;

    #[test]
    fn euler_angles_of_identity() {
        let rot = x_euler_angles(0., 0., 0.);
        assert_relative_eq!(*rot.matrix(), Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn euler_angles_reproduce_triad() {
        // Some arbitrary right-handed orthonormal triad
        let z = Vector3F::new(0.3, -0.4, 0.8).normalize();
        let y = z.cross(&Vector3F::new(0., 0., 1.)).normalize();
        let x = y.cross(&z);

        let (phi, theta, psi) = triad_euler_angles(&x, &y, &z);
        let rot = x_euler_angles(phi, theta, psi);
        assert_relative_eq!(rot * Vector3F::x(), x, epsilon = 1e-12);
        assert_relative_eq!(rot * Vector3F::y(), y, epsilon = 1e-12);
        assert_relative_eq!(rot * Vector3F::z(), z, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_euler_angles() {
        let x = Vector3F::new(0., 1., 0.);
        let y = Vector3F::new(-1., 0., 0.);
        let z = Vector3F::z();
        let (phi, theta, psi) = triad_euler_angles(&x, &y, &z);
        let rot = x_euler_angles(phi, theta, psi);
        assert_relative_eq!(rot * Vector3F::x(), x, epsilon = 1e-12);
        assert_relative_eq!(rot * Vector3F::y(), y, epsilon = 1e-12);
    }

    #[test]
    fn z_axis_rotation_matches_triad() {
        let new_z = Vector3F::new(1., 1., 0.);
        let rot = from_z_axis(&new_z, &Vector3F::new(0., 0., 1.));
        assert_relative_eq!(rot * Vector3F::z(), new_z.normalize(), epsilon = 1e-12);
        assert_relative_eq!(rot * Vector3F::x(), Vector3F::z(), epsilon = 1e-12);
        let inverse = rot.inverse();
        assert_relative_eq!(inverse * new_z.normalize(), Vector3F::z(), epsilon = 1e-12);
    }

    #[test]
    fn quarter_turn_around_z() {
        let v = rotate_around(&Vector3F::y(), 3. * FRAC_PI_2, &Vector3F::z());
        assert_relative_eq!(v, Vector3F::x(), epsilon = 1e-12);
        let w = rotate_around(&Vector3F::x(), PI, &Vector3F::new(0., 0., 2.));
        assert_relative_eq!(w, -Vector3F::x(), epsilon = 1e-12);
    }
}
