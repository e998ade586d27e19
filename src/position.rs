//! Position resolver: (element set, Julian Day) → Cartesian position.
//!
//! Composes the Kepler solver and the frame transform. All results are
//! ephemeral: recomputed on every query, never stored.

use nalgebra::Vector3;

use crate::constants::{AstronomicalUnit, JulianDay, Radian};
use crate::kepler::{principal_angle, solve_kepler};
use crate::orbital_elements::OrbitalElements;
use crate::ref_frame::perifocal_to_ecliptic;

/// Derived state of a body at one instant, computed on demand for the
/// inspection surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetState {
    /// Heliocentric position in the ecliptic J2000 frame, AU.
    pub position: Vector3<f64>,
    /// True anomaly ν in radians, `[0, 2π)`.
    pub true_anomaly: Radian,
    /// Distance from the focus, AU.
    pub radial_distance: AstronomicalUnit,
}

/// Mean anomaly at `julian_day`, wrapped to `[0, 2π)`.
fn mean_anomaly_at(elements: &OrbitalElements, julian_day: JulianDay) -> Radian {
    let elapsed_days = julian_day - elements.epoch;
    principal_angle(elements.mean_anomaly + elements.mean_motion * elapsed_days)
}

/// Eccentric anomaly at `julian_day`.
fn eccentric_anomaly_at(elements: &OrbitalElements, julian_day: JulianDay) -> Radian {
    solve_kepler(mean_anomaly_at(elements, julian_day), elements.eccentricity)
}

/// Heliocentric ecliptic position of a body at a given Julian Day, in AU.
///
/// Steps: elapsed days since epoch → wrapped mean anomaly → eccentric
/// anomaly (Newton–Raphson) → perifocal coordinates → frame rotation.
pub fn position_at(elements: &OrbitalElements, julian_day: JulianDay) -> Vector3<f64> {
    let ecc_anomaly = eccentric_anomaly_at(elements, julian_day);

    let a = elements.semi_major_axis;
    let e = elements.eccentricity;
    let perifocal = Vector3::new(
        a * (ecc_anomaly.cos() - e),
        a * (1.0 - e * e).sqrt() * ecc_anomaly.sin(),
        0.0,
    );

    perifocal_to_ecliptic(
        &perifocal,
        elements.inclination,
        elements.ascending_node_longitude,
        elements.periapsis_argument,
    )
}

/// Full derived state (position, true anomaly, radial distance) at a
/// given Julian Day.
///
/// The true anomaly is derived from the eccentric anomaly with the atan2
/// half-angle form, `ν = 2·atan2(√(1+e)·sin(E/2), √(1-e)·cos(E/2))`,
/// which stays well-conditioned near `E = π`.
pub fn state_at(elements: &OrbitalElements, julian_day: JulianDay) -> PlanetState {
    let ecc_anomaly = eccentric_anomaly_at(elements, julian_day);

    let a = elements.semi_major_axis;
    let e = elements.eccentricity;
    let perifocal = Vector3::new(
        a * (ecc_anomaly.cos() - e),
        a * (1.0 - e * e).sqrt() * ecc_anomaly.sin(),
        0.0,
    );

    let true_anomaly = principal_angle(2.0 * f64::atan2(
        (1.0 + e).sqrt() * (ecc_anomaly / 2.0).sin(),
        (1.0 - e).sqrt() * (ecc_anomaly / 2.0).cos(),
    ));

    PlanetState {
        position: perifocal_to_ecliptic(
            &perifocal,
            elements.inclination,
            elements.ascending_node_longitude,
            elements.periapsis_argument,
        ),
        true_anomaly,
        radial_distance: a * (1.0 - e * ecc_anomaly.cos()),
    }
}
