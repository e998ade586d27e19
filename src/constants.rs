//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `orrery` library, together with the [`Planet`] identifier
//! used to address solar system bodies.
//!
//! ## Overview
//!
//! - Astronomical constants and unit conversions (degrees ↔ radians, days ↔ seconds, AU ↔ km)
//! - Core type aliases used across the crate
//! - [`Planet`]: identifiers, JPL Horizons command ids, and physical radii
//!
//! These definitions are used by all main modules: the Kepler solver, the position resolver,
//! the simulation clock and the ephemeris acquisition layer.

use std::str::FromStr;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Julian Day of the J2000.0 reference epoch (2000-01-01 12:00 TT)
pub const JD2000: f64 = 2_451_545.0;

/// Sidereal year in days for a 1 AU orbit, used by Kepler's third law
/// to estimate a period from a semi-major axis in a solar-mass system.
pub const DAYS_PER_YEAR: f64 = 365.256;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Continuous day count on the Julian Day scale
pub type JulianDay = f64;

// -------------------------------------------------------------------------------------------------
// Body identifiers
// -------------------------------------------------------------------------------------------------

/// Identifier of a major solar system body tracked by the simulation.
///
/// Each variant maps to a JPL Horizons numeric command id through
/// [`Planet::horizons_id`]. Pluto is supported but excluded from the
/// default roster ([`MAJOR_PLANETS`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// The default acquisition roster: the 8 major planets, Pluto excluded.
pub const MAJOR_PLANETS: [Planet; 8] = [
    Planet::Mercury,
    Planet::Venus,
    Planet::Earth,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Uranus,
    Planet::Neptune,
];

impl Planet {
    /// JPL Horizons numeric id of the planet's barycenter-relative record.
    pub fn horizons_id(&self) -> &'static str {
        match self {
            Planet::Mercury => "199",
            Planet::Venus => "299",
            Planet::Earth => "399",
            Planet::Mars => "499",
            Planet::Jupiter => "599",
            Planet::Saturn => "699",
            Planet::Uranus => "799",
            Planet::Neptune => "899",
            Planet::Pluto => "999",
        }
    }

    /// Mean physical radius in kilometers.
    pub fn radius_km(&self) -> Kilometer {
        match self {
            Planet::Mercury => 2_439.7,
            Planet::Venus => 6_051.8,
            Planet::Earth => 6_371.0,
            Planet::Mars => 3_389.5,
            Planet::Jupiter => 69_911.0,
            Planet::Saturn => 58_232.0,
            Planet::Uranus => 25_362.0,
            Planet::Neptune => 24_622.0,
            Planet::Pluto => 1_188.3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }
}

impl std::fmt::Display for Planet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Planet {
    type Err = crate::orrery_errors::OrreryError;

    /// Parse a planet from its English name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mercury" => Ok(Planet::Mercury),
            "venus" => Ok(Planet::Venus),
            "earth" => Ok(Planet::Earth),
            "mars" => Ok(Planet::Mars),
            "jupiter" => Ok(Planet::Jupiter),
            "saturn" => Ok(Planet::Saturn),
            "uranus" => Ok(Planet::Uranus),
            "neptune" => Ok(Planet::Neptune),
            "pluto" => Ok(Planet::Pluto),
            _ => Err(crate::orrery_errors::OrreryError::UnknownBody(
                s.to_string(),
            )),
        }
    }
}
