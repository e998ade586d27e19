//! Osculating orbital elements of a single body.
//!
//! [`OrbitalElements`] is the immutable data entity consumed by the position
//! resolver. The constructor resolves every optional field exactly once:
//! downstream code never re-checks for absence.
//!
//! Units:
//! * `epoch`: JD (Julian Day)
//! * `semi_major_axis`: AU (Astronomical Units)
//! * `eccentricity`: unitless, `[0, 1)`
//! * `inclination`, `ascending_node_longitude`, `periapsis_argument`,
//!   `mean_anomaly`: radians, normalized to `[0, 2π)`
//! * `mean_motion`: radians per day
//! * `period`: days

use crate::constants::{
    AstronomicalUnit, Degree, JulianDay, Kilometer, Radian, AU, DAYS_PER_YEAR, DPI, RADEG,
    SECONDS_PER_DAY,
};
use crate::kepler::principal_angle;

/// Osculating Keplerian elements of one body, fully resolved at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElements {
    pub epoch: JulianDay,
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub mean_anomaly: Radian,
    pub mean_motion: Radian,
    pub period: f64,
}

impl OrbitalElements {
    /// Build an element set from angles in radians, resolving optional fields.
    ///
    /// * `period`, when absent, is estimated from the semi-major axis via
    ///   Kepler's third law: `365.256 · a^1.5` (solar-mass unit system).
    /// * `mean_motion`, when absent, is derived from the period: `2π / P`.
    /// * All angles are normalized to `[0, 2π)`.
    ///
    /// Contract: `semi_major_axis > 0` and `eccentricity ∈ [0, 1)`. Values
    /// outside this range are not guarded against here; callers must not
    /// construct them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        epoch: JulianDay,
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
        mean_anomaly: Radian,
        mean_motion: Option<Radian>,
        period: Option<f64>,
    ) -> Self {
        let period = period.unwrap_or_else(|| estimate_period(semi_major_axis));
        let mean_motion = mean_motion.unwrap_or(DPI / period);

        OrbitalElements {
            epoch,
            semi_major_axis,
            eccentricity,
            inclination: principal_angle(inclination),
            ascending_node_longitude: principal_angle(ascending_node_longitude),
            periapsis_argument: principal_angle(periapsis_argument),
            mean_anomaly: principal_angle(mean_anomaly),
            mean_motion,
            period,
        }
    }

    /// Build an element set from angles in degrees, as delivered by
    /// Horizons and the fallback table.
    #[allow(clippy::too_many_arguments)]
    pub fn from_degrees(
        epoch: JulianDay,
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis_argument: Degree,
        mean_anomaly: Degree,
        mean_motion: Option<Degree>,
        period: Option<f64>,
    ) -> Self {
        Self::new(
            epoch,
            semi_major_axis,
            eccentricity,
            inclination * RADEG,
            ascending_node_longitude * RADEG,
            periapsis_argument * RADEG,
            mean_anomaly * RADEG,
            mean_motion.map(|n| n * RADEG),
            period,
        )
    }

    /// Mean orbital speed in km/s, from the circumference of the
    /// circularized orbit and the period.
    pub fn mean_orbital_speed(&self) -> Kilometer {
        let circumference_km = DPI * self.semi_major_axis * AU;
        circumference_km / (self.period * SECONDS_PER_DAY)
    }
}

/// Kepler's third law period estimate for a solar orbit, in days.
pub fn estimate_period(semi_major_axis: AstronomicalUnit) -> f64 {
    DAYS_PER_YEAR * semi_major_axis.powf(1.5)
}

#[cfg(test)]
mod orbital_elements_test {
    use super::*;
    use crate::constants::JD2000;

    #[test]
    fn test_estimate_period_one_au() {
        assert_eq!(estimate_period(1.0), DAYS_PER_YEAR);
    }

    #[test]
    fn test_period_resolution() {
        // Absent period is estimated, absent mean motion derived from it
        let el = OrbitalElements::new(JD2000, 1.0, 0.0167, 0.0, 0.0, 0.0, 0.0, None, None);
        assert_eq!(el.period, DAYS_PER_YEAR);
        assert_eq!(el.mean_motion, DPI / DAYS_PER_YEAR);

        // Supplied values win over the estimates
        let el = OrbitalElements::new(
            JD2000,
            1.523679,
            0.0934,
            0.0,
            0.0,
            0.0,
            0.0,
            Some(0.5240329502 * RADEG),
            Some(686.980),
        );
        assert_eq!(el.period, 686.980);
        assert_eq!(el.mean_motion, 0.5240329502 * RADEG);
    }

    #[test]
    fn test_angle_normalization() {
        let el = OrbitalElements::from_degrees(
            JD2000, 1.0, 0.0167, 0.00005, -11.26064, 114.20783, 358.617, None, None,
        );
        // -11.26064° wraps to 348.73936°
        assert!((el.ascending_node_longitude - 348.73936 * RADEG).abs() < 1e-12);
        assert!(el.mean_anomaly >= 0.0 && el.mean_anomaly < DPI);
        assert!(el.inclination >= 0.0 && el.inclination < DPI);
    }

    #[test]
    fn test_mean_orbital_speed_earth() {
        let el = OrbitalElements::from_degrees(
            JD2000,
            1.0,
            0.0167086,
            0.00005,
            -11.26064,
            114.20783,
            358.617,
            Some(0.9856076686),
            Some(365.256),
        );
        // Earth's mean orbital speed is close to 29.8 km/s
        let speed = el.mean_orbital_speed();
        assert!((speed - 29.78).abs() < 0.05, "speed = {speed}");
    }
}
