//! Heliocentric state of the Earth at one instant.
//!
//! The catalog carries elements of the Earth–Moon barycentre; the geocentre is recovered by
//! removing the Moon's share, `moon / (1 + M⊕/M☾)`. The velocity, needed by the annual
//! aberration, is a central difference over ±0.005 day.
//!
//! An [`EarthState`] is computed once per instant and shared read-only by every body
//! reduced at that instant.

use log::debug;
use nalgebra::Vector3;

use crate::{
    bodies::orbital_elements::OrbitalElements,
    constants::{JulianDate, EARTH_MOON_MASS_RATIO},
    ephemeris_errors::EphemerisError,
    kepler::heliocentric_position,
    lunar::moon_equatorial_j2000,
};

/// Half-width of the velocity difference, in days
const VELOCITY_STEP: f64 = 0.005;

#[derive(Debug, Clone, PartialEq)]
pub struct EarthState {
    pub jd_tt: JulianDate,
    /// Heliocentric position, equatorial J2000 (AU)
    pub position: Vector3<f64>,
    /// Heliocentric velocity, equatorial J2000 (AU/day)
    pub velocity: Vector3<f64>,
    elements: OrbitalElements,
    kepler_tolerance: f64,
    kepler_max_iterations: usize,
}

impl EarthState {
    /// Solve the Earth at `jd_tt` from the barycentre elements.
    pub fn compute(
        elements: &OrbitalElements,
        jd_tt: JulianDate,
        kepler_tolerance: f64,
        kepler_max_iterations: usize,
    ) -> Result<Self, EphemerisError> {
        let mut state = EarthState {
            jd_tt,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            elements: elements.clone(),
            kepler_tolerance,
            kepler_max_iterations,
        };

        state.position = state.heliocentric_at(jd_tt)?;
        let ahead = state.heliocentric_at(jd_tt + VELOCITY_STEP)?;
        let behind = state.heliocentric_at(jd_tt - VELOCITY_STEP)?;
        state.velocity = (ahead - behind) / (2.0 * VELOCITY_STEP);

        debug!(
            "earth at JD(TT) {jd_tt}: r = {:.9} AU, v = {:.9} AU/d",
            state.position.norm(),
            state.velocity.norm()
        );
        Ok(state)
    }

    /// Heliocentric position of the geocentre at another instant, from the same elements.
    pub fn heliocentric_at(&self, jd_tt: JulianDate) -> Result<Vector3<f64>, EphemerisError> {
        let barycentre = heliocentric_position(
            &self.elements,
            jd_tt,
            self.kepler_tolerance,
            self.kepler_max_iterations,
        )?;
        let moon = moon_equatorial_j2000(jd_tt);
        Ok(barycentre.equatorial - moon / (1.0 + EARTH_MOON_MASS_RATIO))
    }

    pub fn distance_to_sun(&self) -> f64 {
        self.position.norm()
    }
}

#[cfg(test)]
mod earth_test {
    use super::*;
    use crate::bodies::catalog::BodyCatalog;
    use crate::constants::{AU, J2000, SECONDS_PER_DAY};
    use approx::assert_abs_diff_eq;

    fn earth_at(jd: JulianDate) -> EarthState {
        let catalog = BodyCatalog::builtin();
        EarthState::compute(catalog.earth_elements().unwrap(), jd, 1e-11, 64).unwrap()
    }

    #[test]
    fn test_orbital_speed() {
        let earth = earth_at(J2000);
        let speed_km_s = earth.velocity.norm() * AU / SECONDS_PER_DAY;
        // Near perihelion, the Earth moves at about 30.3 km/s.
        assert_abs_diff_eq!(speed_km_s, 30.29, epsilon = 0.05);
        // The velocity is perpendicular to the radius up to the eccentricity.
        let cos = earth.velocity.normalize().dot(&earth.position.normalize());
        assert!(cos.abs() < 0.02);
    }

    #[test]
    fn test_geocentre_offset_from_barycentre() {
        let earth = earth_at(J2000);
        let catalog = BodyCatalog::builtin();
        let bary =
            heliocentric_position(catalog.earth_elements().unwrap(), J2000, 1e-11, 64).unwrap();
        let offset_km = (earth.position - bary.equatorial).norm() * AU;
        // The geocentre orbits the barycentre at about 4670 km.
        assert!((4_000.0..5_000.0).contains(&offset_km), "{offset_km}");
        assert_eq!(earth.heliocentric_at(J2000).unwrap(), earth.position);
    }
}
