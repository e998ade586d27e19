//! # Orrery
//!
//! Orbital mechanics and ephemeris acquisition core for a solar system
//! visualization: two-body Keplerian propagation per planet, a simulated
//! time base decoupled from wall-clock time, and a resilient two-source
//! acquisition layer (JPL Horizons with bounded-latency failover to a
//! static J2000 table).

pub mod clock;
pub mod constants;
pub mod ephemeris;
pub mod jpl_request;
mod kepler;
pub mod orbital_elements;
pub mod orrery;
pub mod orrery_errors;
pub mod position;
pub mod ref_frame;

pub use kepler::{principal_angle, solve_kepler};
