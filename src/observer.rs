//! # Observer snapshot
//!
//! An [`Observer`] fixes one UTC instant and one geodetic site. Every quantity the reducer
//! needs from it is derived once at construction: the time scales and the geocentric
//! parallax constants (ρ·cos φ′, ρ·sin φ′) of the site.
//!
//! The snapshot is immutable. The motion solver does not go through it: it samples the
//! Earth state directly at each instant.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    constants::{Degree, Meter, Radian, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, ERAU, RADEG},
    ephemeris_errors::EphemerisError,
    time::TimeScales,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    pub epoch: Epoch,
    pub time: TimeScales,
    /// Geodetic latitude, north positive
    pub latitude: Degree,
    /// Geodetic longitude, east positive
    pub longitude: Degree,
    /// Height above the reference ellipsoid
    pub elevation: Meter,
    /// Geocentric parallax constants in Earth equatorial radii
    pub rho_cos_phi: f64,
    pub rho_sin_phi: f64,
}

impl Observer {
    /// Build an observer at `epoch` (any time scale; UTC is used for sidereal time).
    ///
    /// Errors
    /// ------
    /// * [`EphemerisError::InvalidObserver`] when the latitude is outside [−90, 90], the
    ///   longitude outside [−180, 180], or any coordinate is not finite.
    pub fn new(
        epoch: Epoch,
        latitude: Degree,
        longitude: Degree,
        elevation: Meter,
    ) -> Result<Self, EphemerisError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(EphemerisError::InvalidObserver(format!(
                "latitude must lie in [-90, 90], got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(EphemerisError::InvalidObserver(format!(
                "longitude must lie in [-180, 180], got {longitude}"
            )));
        }
        if !elevation.is_finite() {
            return Err(EphemerisError::InvalidObserver(format!(
                "elevation must be finite, got {elevation}"
            )));
        }

        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, elevation);
        Ok(Observer {
            epoch,
            time: TimeScales::from_epoch(&epoch),
            latitude,
            longitude,
            elevation,
            rho_cos_phi,
            rho_sin_phi,
        })
    }

    /// Build an observer from a UTC calendar date.
    #[allow(clippy::too_many_arguments)]
    pub fn from_gregorian_utc(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        latitude: Degree,
        longitude: Degree,
        elevation: Meter,
    ) -> Result<Self, EphemerisError> {
        let epoch = Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, 0)
            .map_err(|e| EphemerisError::InvalidObserver(format!("invalid UTC date: {e}")))?;
        Observer::new(epoch, latitude, longitude, elevation)
    }

    /// Geocentric position of the site in the true equatorial frame of date (AU), for the
    /// local apparent sidereal time `last`.
    pub fn geocentric_position(&self, last: Radian) -> Vector3<f64> {
        let (sin_t, cos_t) = last.sin_cos();
        Vector3::new(
            ERAU * self.rho_cos_phi * cos_t,
            ERAU * self.rho_cos_phi * sin_t,
            ERAU * self.rho_sin_phi,
        )
    }
}

/// Geocentric parallax constants from geodetic latitude (radians) and height (meters).
///
/// Returns `(ρ·cos φ′, ρ·sin φ′)` in Earth equatorial radii, on the GRS80 ellipsoid.
pub fn lat_alt_to_parallax(lat: Radian, height: Meter) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    // Parametric latitude
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height / EARTH_MAJOR_AXIS) * lat.sin();
    let rho_cos_phi = u.cos() + (height / EARTH_MAJOR_AXIS) * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// Same as [`lat_alt_to_parallax`] with the latitude in degrees.
pub fn geodetic_to_parallax(lat: Degree, height: Meter) -> (f64, f64) {
    lat_alt_to_parallax(lat * RADEG, height)
}

#[cfg(test)]
mod observer_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parallax_constants() {
        let (c, s) = geodetic_to_parallax(0.0, 0.0);
        assert_abs_diff_eq!(c, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(s, 0.0, epsilon = 1e-15);

        let (c, s) = geodetic_to_parallax(90.0, 0.0);
        assert_abs_diff_eq!(c, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s, EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS, epsilon = 1e-12);

        // Geocentric latitude is smaller than geodetic latitude at mid-latitudes.
        let (c, s) = geodetic_to_parallax(45.0, 0.0);
        assert!(s.atan2(c) < 45.0 * RADEG);
        assert_abs_diff_eq!(s.atan2(c) / RADEG, 44.8076, epsilon = 1e-3);
    }

    #[test]
    fn test_invalid_site() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);
        assert!(matches!(
            Observer::new(epoch, 91.0, 0.0, 0.0),
            Err(EphemerisError::InvalidObserver(_))
        ));
        assert!(Observer::new(epoch, 0.0, -180.5, 0.0).is_err());
        assert!(Observer::new(epoch, 0.0, 0.0, f64::NAN).is_err());
        assert!(Observer::from_gregorian_utc(2019, 13, 1, 0, 0, 0, 0.0, 0.0, 0.0).is_err());
    }
}
