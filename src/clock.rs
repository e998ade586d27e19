//! Simulated-time base of the animation, decoupled from wall-clock time.
//!
//! [`SimulationClock`] maps elapsed real seconds and a user-chosen speed
//! factor onto a simulated Julian Day. All mutation goes through its
//! methods; no other module keeps time state.

use chrono::{Datelike, NaiveDate};

use crate::constants::JulianDay;

/// Upper bound on the speed factor, in simulated days per real second.
pub const MAX_SPEED_FACTOR: f64 = 1024.0;

/// Lower bound on the speed factor.
pub const MIN_SPEED_FACTOR: f64 = 1.0 / 1024.0;

/// Default speed: 1 real second advances half a simulated day.
pub const DEFAULT_SPEED_FACTOR: f64 = 0.5;

/// Convert a Gregorian calendar date to the Julian Day at 00:00 UTC.
///
/// Standard century-corrected conversion (Meeus), valid over the whole
/// Gregorian range used by the simulation. 2000-01-01 maps to 2451544.5.
pub fn calendar_to_julian_day(date: NaiveDate) -> JulianDay {
    let mut y = date.year() as f64;
    let mut m = date.month() as f64;
    let d = date.day() as f64;

    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + d + b - 1524.5
}

/// Process-wide simulation time state.
///
/// Invariant: `current_julian_day() = base_julian_day + offset_days` is
/// monotonically non-decreasing between date resets, and strictly
/// increasing while the animation loop advances with a positive speed
/// factor.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    base_julian_day: JulianDay,
    offset_days: f64,
    speed_factor: f64,
}

impl SimulationClock {
    /// Clock anchored at an explicit base Julian Day.
    pub fn new(base_julian_day: JulianDay) -> Self {
        SimulationClock {
            base_julian_day,
            offset_days: 0.0,
            speed_factor: DEFAULT_SPEED_FACTOR,
        }
    }

    /// Clock anchored at a calendar date, 00:00 UTC.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(calendar_to_julian_day(date))
    }

    /// Clock anchored at the current date at local midnight.
    pub fn today() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Advance simulated time by `elapsed_real_seconds` of wall-clock time,
    /// scaled by the current speed factor.
    pub fn advance(&mut self, elapsed_real_seconds: f64) {
        self.offset_days += elapsed_real_seconds * self.speed_factor;
    }

    /// Re-anchor the clock at a calendar date and reset the accumulated
    /// offset to exactly zero.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.base_julian_day = calendar_to_julian_day(date);
        self.offset_days = 0.0;
    }

    /// Double the speed factor, clamped to [`MAX_SPEED_FACTOR`].
    pub fn speed_up(&mut self) {
        self.speed_factor = (self.speed_factor * 2.0).clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR);
    }

    /// Halve the speed factor, clamped to [`MIN_SPEED_FACTOR`].
    pub fn speed_down(&mut self) {
        self.speed_factor = (self.speed_factor / 2.0).clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR);
    }

    /// Restore the default speed factor.
    pub fn reset_speed(&mut self) {
        self.speed_factor = DEFAULT_SPEED_FACTOR;
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    /// Current simulated Julian Day.
    pub fn current_julian_day(&self) -> JulianDay {
        self.base_julian_day + self.offset_days
    }

    /// Human-readable speed description for the UI, e.g. `1 day = 2 sec`
    /// or `4 days/sec`.
    pub fn speed_label(&self) -> String {
        let seconds_per_day = 1.0 / self.speed_factor;
        if seconds_per_day >= 1.0 {
            format!("1 day = {seconds_per_day:.0} sec")
        } else {
            format!("{:.1} days/sec", self.speed_factor)
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::today()
    }
}
