//! Reference frame transformation: perifocal → ecliptic J2000.
//!
//! The perifocal frame has its x-axis toward periapsis and lies in the
//! orbital plane. Bringing a perifocal point into the ecliptic frame takes
//! three sequential rotations, composed as `Rz(Ω) · Rx(i) · Rz(ω)`:
//! argument of periapsis about the plane normal, inclination about the new
//! x-axis, ascending node longitude about the original normal. Rotations do
//! not commute, so this order is fixed.
//!
//! Both the live per-tick position computation and the static orbit-path
//! sampling go through [`perifocal_to_ecliptic`]: a single implementation,
//! so the drawn path and the animated body can never drift apart.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Radian, DPI};
use crate::orbital_elements::OrbitalElements;

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// Builds an **active rotation** of a 3D vector by `alpha` radians around the
/// chosen axis, in the direct (trigonometric) sense.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians.
/// * `k`: axis index, `0` → X, `1` → Y, `2` → Z.
///
/// Return
/// ------
/// * A rotation matrix `R` such that the rotated vector is `x' = R · x`.
///
/// Panics if `k > 2`, as only axes 0-2 are valid.
pub(crate) fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Compound rotation from the perifocal frame to the ecliptic J2000 frame.
///
/// `R = Rz(Ω) · Rx(i) · Rz(ω)`, see Vallado.
pub fn perifocal_rotation(
    inclination: Radian,
    ascending_node_longitude: Radian,
    periapsis_argument: Radian,
) -> Matrix3<f64> {
    rotmt(ascending_node_longitude, 2) * rotmt(inclination, 0) * rotmt(periapsis_argument, 2)
}

/// Rotate a perifocal-frame point into the ecliptic J2000 frame.
pub fn perifocal_to_ecliptic(
    perifocal: &Vector3<f64>,
    inclination: Radian,
    ascending_node_longitude: Radian,
    periapsis_argument: Radian,
) -> Vector3<f64> {
    perifocal_rotation(inclination, ascending_node_longitude, periapsis_argument) * perifocal
}

/// Sample the orbit ellipse of an element set as a closed polyline in the
/// ecliptic frame, for orbit-path visualization.
///
/// The ellipse is traced with a uniform **parametric** angle, which yields a
/// geometrically exact shape but not a time-faithful point density. The
/// position resolver never uses this sampling; it always solves Kepler's
/// equation for the true orbital phase.
pub fn orbit_path(elements: &OrbitalElements, steps: usize) -> Vec<Vector3<f64>> {
    let a = elements.semi_major_axis;
    let e = elements.eccentricity;
    let b = a * (1.0 - e * e).sqrt();

    let rotation = perifocal_rotation(
        elements.inclination,
        elements.ascending_node_longitude,
        elements.periapsis_argument,
    );

    (0..steps)
        .map(|i| {
            let theta = i as f64 / steps as f64 * DPI;
            // Parametric ellipse in the perifocal frame, focus at the origin
            let perifocal = Vector3::new(a * theta.cos() - a * e, b * theta.sin(), 0.0);
            rotation * perifocal
        })
        .collect()
}
