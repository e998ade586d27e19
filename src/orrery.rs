//! # Orrery: simulation façade for the renderer/UI layer
//!
//! This module defines the [`Orrery`] struct, the central façade wiring
//! together:
//!
//! 1. **Ephemeris acquisition** ([`EphemerisProvider`]) — populates the
//!    body registry once at startup and on explicit retry.
//! 2. **Simulated time** ([`SimulationClock`]) — advanced once per
//!    animation tick.
//! 3. **Position resolution** ([`crate::position`]) — recomputed per query
//!    for every tracked body.
//!
//! The renderer consumes [`current_positions`](Orrery::current_positions)
//! every frame and the inspection panel calls
//! [`body_detail`](Orrery::body_detail) on demand. A retry wholesale
//! replaces the element-set roster; partial merges are deliberately not
//! modeled so all bodies stay on one data source.
//!
//! All mutation happens on the single tick thread; acquisition is the only
//! suspending operation and it never blocks queries against the
//! already-resolved roster.

use std::collections::HashMap;

use chrono::NaiveDate;
use nalgebra::Vector3;

use crate::clock::SimulationClock;
use crate::constants::{AstronomicalUnit, JulianDay, Kilometer, Planet, Radian, AU};
use crate::ephemeris::{AcquisitionResult, DataSource, EphemerisProvider};
use crate::orbital_elements::OrbitalElements;
use crate::position::{position_at, state_at};
use crate::ref_frame;

/// Distance below which a body is close enough to the observer for the
/// renderer to switch to its detailed representation, AU.
const DETAIL_RADIUS_BASE_AU: f64 = 0.4;

/// Additional detail reach per unit of clamped visual radius, AU.
const DETAIL_RADIUS_PER_UNIT_AU: f64 = 4.0 / 3.0;

/// Orbital detail of one body at the current simulated instant, for the
/// inspection surface.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDetail {
    pub radius_km: Kilometer,
    pub radial_distance: AstronomicalUnit,
    pub radial_distance_km: Kilometer,
    pub true_anomaly: Radian,
    pub period_days: f64,
    pub mean_orbital_speed_kms: f64,
}

/// Simulation core: clock, provider, and the tracked-body registry.
#[derive(Debug)]
pub struct Orrery {
    provider: EphemerisProvider,
    clock: SimulationClock,
    targets: Vec<Planet>,
    bodies: HashMap<Planet, OrbitalElements>,
    source: DataSource,
    used_fallback: bool,
}

impl Orrery {
    /// Build the simulation and run the initial acquisition.
    ///
    /// Arguments
    /// ---------
    /// * `provider`: configured acquisition layer.
    /// * `clock`: simulated-time base (typically [`SimulationClock::today`]).
    /// * `targets`: roster of bodies to track (typically
    ///   [`crate::constants::MAJOR_PLANETS`]).
    /// * `as_of`: calendar date anchoring the remote ephemeris window.
    pub async fn initialize(
        provider: EphemerisProvider,
        clock: SimulationClock,
        targets: Vec<Planet>,
        as_of: NaiveDate,
    ) -> Self {
        let batch = provider.acquire(&targets, as_of).await;
        let mut orrery = Orrery {
            provider,
            clock,
            targets,
            bodies: HashMap::new(),
            source: DataSource::Fallback,
            used_fallback: true,
        };
        orrery.replace_roster(batch);
        orrery
    }

    /// Re-run acquisition and wholesale replace the element-set roster.
    /// The previous roster is discarded, never merged into.
    pub async fn retry_acquisition(&mut self, as_of: NaiveDate) {
        let batch = self.provider.acquire(&self.targets, as_of).await;
        self.replace_roster(batch);
    }

    fn replace_roster(&mut self, batch: AcquisitionResult) {
        self.bodies = batch.elements;
        self.source = batch.source;
        self.used_fallback = batch.used_fallback;
    }

    // ---------------------------------------------------------------------
    // Per-frame surface
    // ---------------------------------------------------------------------

    /// Advance simulated time by one animation tick of `elapsed_real_seconds`.
    pub fn tick(&mut self, elapsed_real_seconds: f64) {
        self.clock.advance(elapsed_real_seconds);
    }

    /// Heliocentric positions of every tracked body at the current
    /// simulated instant, in AU.
    pub fn current_positions(&self) -> HashMap<Planet, Vector3<f64>> {
        let julian_day = self.clock.current_julian_day();
        self.bodies
            .iter()
            .map(|(&planet, elements)| (planet, position_at(elements, julian_day)))
            .collect()
    }

    /// Position of a single tracked body, or `None` if it is not in the
    /// roster.
    pub fn position_of(&self, planet: Planet) -> Option<Vector3<f64>> {
        let julian_day = self.clock.current_julian_day();
        self.bodies
            .get(&planet)
            .map(|elements| position_at(elements, julian_day))
    }

    /// On-demand orbital detail for the inspection panel.
    pub fn body_detail(&self, planet: Planet) -> Option<BodyDetail> {
        let elements = self.bodies.get(&planet)?;
        let state = state_at(elements, self.clock.current_julian_day());
        Some(BodyDetail {
            radius_km: planet.radius_km(),
            radial_distance: state.radial_distance,
            radial_distance_km: state.radial_distance * AU,
            true_anomaly: state.true_anomaly,
            period_days: elements.period,
            mean_orbital_speed_kms: elements.mean_orbital_speed(),
        })
    }

    /// Closed orbit polyline of a tracked body for path rendering.
    pub fn orbit_path(&self, planet: Planet, steps: usize) -> Option<Vec<Vector3<f64>>> {
        self.bodies
            .get(&planet)
            .map(|elements| ref_frame::orbit_path(elements, steps))
    }

    /// Whether the observer is close enough to a body for the renderer to
    /// switch to its detailed representation. Pure query; the core keeps
    /// no rendering state.
    pub fn is_within_detail_radius(&self, planet: Planet, observer: &Vector3<f64>) -> bool {
        let Some(position) = self.position_of(planet) else {
            return false;
        };
        (observer - position).norm() < detail_radius(planet)
    }

    // ---------------------------------------------------------------------
    // Clock mutators and accessors
    // ---------------------------------------------------------------------

    /// Re-anchor simulated time at a calendar date (offset reset to zero).
    pub fn set_date(&mut self, date: NaiveDate) {
        self.clock.set_date(date);
    }

    pub fn speed_up(&mut self) {
        self.clock.speed_up();
    }

    pub fn speed_down(&mut self) {
        self.clock.speed_down();
    }

    pub fn reset_speed(&mut self) {
        self.clock.reset_speed();
    }

    pub fn speed_factor(&self) -> f64 {
        self.clock.speed_factor()
    }

    pub fn speed_label(&self) -> String {
        self.clock.speed_label()
    }

    pub fn current_julian_day(&self) -> JulianDay {
        self.clock.current_julian_day()
    }

    // ---------------------------------------------------------------------
    // Provenance
    // ---------------------------------------------------------------------

    /// Which source produced the current roster.
    pub fn data_source(&self) -> DataSource {
        self.source
    }

    /// Passive indicator for the UI banner: true when the roster came from
    /// the static table.
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Bodies currently tracked, in roster order.
    pub fn targets(&self) -> &[Planet] {
        &self.targets
    }

    /// Element set of a tracked body.
    pub fn elements_of(&self, planet: Planet) -> Option<&OrbitalElements> {
        self.bodies.get(&planet)
    }
}

/// Detail-switch distance for a body, derived from its clamped visual
/// radius: larger planets trip the detail threshold from further away.
fn detail_radius(planet: Planet) -> f64 {
    let max_visual = if planet == Planet::Jupiter { 1.8 } else { 1.2 };
    let visual_radius = (planet.radius_km() * 5.0e-5).clamp(0.15, max_visual);
    DETAIL_RADIUS_BASE_AU + visual_radius * DETAIL_RADIUS_PER_UNIT_AU
}
