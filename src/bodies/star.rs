use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    angles::polar_to_rect,
    constants::{AstronomicalUnit, Degree, JulianDate, DAYS_PER_JULIAN_YEAR, J2000, RADEG, RADMAS},
};

/// Catalog place of a fixed star, mean equator and equinox J2000.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarCoordinates {
    pub right_ascension: Degree,
    pub declination: Degree,
    /// Proper motion in right ascension, μα·cos δ (mas/yr)
    #[serde(default)]
    pub pm_ra: f64,
    /// Proper motion in declination (mas/yr)
    #[serde(default)]
    pub pm_dec: f64,
    /// Annual parallax (mas); zero when unknown
    #[serde(default)]
    pub parallax: f64,
    /// Epoch of the catalog position (JD)
    #[serde(default = "default_epoch")]
    pub epoch: JulianDate,
}

fn default_epoch() -> JulianDate {
    J2000
}

impl StarCoordinates {
    pub fn new(right_ascension: Degree, declination: Degree) -> Self {
        StarCoordinates {
            right_ascension,
            declination,
            pm_ra: 0.0,
            pm_dec: 0.0,
            parallax: 0.0,
            epoch: J2000,
        }
    }

    pub fn with_proper_motion(mut self, pm_ra: f64, pm_dec: f64) -> Self {
        self.pm_ra = pm_ra;
        self.pm_dec = pm_dec;
        self
    }

    pub fn with_parallax(mut self, parallax: f64) -> Self {
        self.parallax = parallax;
        self
    }

    /// Heliocentric distance from the parallax, `None` without a positive parallax.
    pub fn distance(&self) -> Option<AstronomicalUnit> {
        (self.parallax > 0.0).then(|| 1.0 / (self.parallax * RADMAS))
    }

    /// Unit vector towards the star at `jd`, proper motion applied linearly from the catalog
    /// epoch.
    pub fn direction_at(&self, jd: JulianDate) -> Vector3<f64> {
        let years = (jd - self.epoch) / DAYS_PER_JULIAN_YEAR;
        let dec = self.declination * RADEG + self.pm_dec * years * RADMAS;
        let cos_dec = (self.declination * RADEG).cos();
        let ra = if cos_dec.abs() > f64::EPSILON {
            self.right_ascension * RADEG + self.pm_ra * years * RADMAS / cos_dec
        } else {
            self.right_ascension * RADEG
        };
        polar_to_rect(ra, dec, 1.0)
    }

    /// Heliocentric equatorial J2000 vector at `jd`: the direction scaled by the parallax
    /// distance, or the bare direction when no parallax is known.
    pub fn heliocentric_at(&self, jd: JulianDate) -> Vector3<f64> {
        let direction = self.direction_at(jd);
        match self.distance() {
            Some(d) => direction * d,
            None => direction,
        }
    }
}
