use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        AstronomicalUnit, Degree, JulianDate, Radian, DAYS_PER_JULIAN_CENTURY, GAUSS_GRAV, J2000,
        RADEG,
    },
    ephemeris_errors::EphemerisError,
};

/// Linear drift of the mean elements, per Julian century.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SecularRates {
    pub semi_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub ascending_node: Degree,
    pub perihelion_longitude: Degree,
}

/// Heliocentric elliptic elements of a body, referred to the ecliptic and equinox `equinox`.
///
/// Either `semi_axis` or `perihelion_distance` must be given; the semi-major axis is derived
/// as `q / (1 - e)` otherwise. A `daily_motion` of zero is derived from the semi-major axis
/// with the Gaussian gravitational constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Epoch of the mean anomaly (JD, TT)
    pub epoch: JulianDate,
    pub inclination: Degree,
    pub ascending_node: Degree,
    pub argument_of_perihelion: Degree,
    #[serde(default)]
    pub semi_axis: Option<AstronomicalUnit>,
    #[serde(default)]
    pub perihelion_distance: Option<AstronomicalUnit>,
    /// Mean motion in degrees per day
    #[serde(default)]
    pub daily_motion: Degree,
    pub eccentricity: f64,
    pub mean_anomaly: Degree,
    #[serde(default = "default_equinox")]
    pub equinox: JulianDate,
    #[serde(default)]
    pub rates: Option<SecularRates>,
}

fn default_equinox() -> JulianDate {
    J2000
}

/// Elements evaluated at one instant, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElements {
    pub semi_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node: Radian,
    pub argument_of_perihelion: Radian,
    pub mean_anomaly: Radian,
}

impl OrbitalElements {
    /// Build elements from a table of J2000 mean longitudes and their rates per century.
    ///
    /// Arguments
    /// ---------
    /// * `a`, `e`, `i`: semi-major axis (AU), eccentricity, inclination (deg).
    /// * `mean_longitude`, `perihelion_longitude`, `ascending_node`: L, ϖ, Ω at J2000 (deg).
    /// * `rates`: drift of a, e, i, Ω and ϖ, plus `mean_longitude_rate` for L.
    ///
    /// The mean anomaly is `L − ϖ`, the argument of perihelion `ϖ − Ω`, and the mean motion
    /// `(L̇ − ϖ̇) / 36525` degrees per day.
    #[allow(clippy::too_many_arguments)]
    pub fn from_mean_longitudes(
        a: AstronomicalUnit,
        e: f64,
        i: Degree,
        mean_longitude: Degree,
        perihelion_longitude: Degree,
        ascending_node: Degree,
        mean_longitude_rate: Degree,
        rates: SecularRates,
    ) -> Self {
        OrbitalElements {
            epoch: J2000,
            inclination: i,
            ascending_node,
            argument_of_perihelion: perihelion_longitude - ascending_node,
            semi_axis: Some(a),
            perihelion_distance: None,
            daily_motion: (mean_longitude_rate - rates.perihelion_longitude)
                / DAYS_PER_JULIAN_CENTURY,
            eccentricity: e,
            mean_anomaly: mean_longitude - perihelion_longitude,
            equinox: J2000,
            rates: Some(rates),
        }
    }

    /// Semi-major axis, derived from the perihelion distance when not given.
    pub fn semi_major_axis(&self) -> Result<AstronomicalUnit, EphemerisError> {
        match (self.semi_axis, self.perihelion_distance) {
            (Some(a), _) if a > 0.0 => Ok(a),
            (_, Some(q)) if q > 0.0 && self.eccentricity < 1.0 => {
                Ok(q / (1.0 - self.eccentricity))
            }
            _ => Err(EphemerisError::InvalidBodyRecord(format!(
                "no usable semi-major axis (a = {:?}, q = {:?}, e = {})",
                self.semi_axis, self.perihelion_distance, self.eccentricity
            ))),
        }
    }

    /// Mean motion in degrees per day.
    pub fn mean_daily_motion(&self) -> Result<Degree, EphemerisError> {
        if self.daily_motion != 0.0 {
            return Ok(self.daily_motion);
        }
        let a = self.semi_major_axis()?;
        Ok(GAUSS_GRAV / (a * a.sqrt()) / RADEG)
    }

    /// Evaluate the elements at `jd` (TT): secular drift applied, mean anomaly advanced.
    pub fn at(&self, jd: JulianDate) -> Result<MeanElements, EphemerisError> {
        let rates = self.rates.unwrap_or_default();
        let t = (jd - self.epoch) / DAYS_PER_JULIAN_CENTURY;

        let ascending_node = self.ascending_node + rates.ascending_node * t;
        let perihelion_drift = rates.perihelion_longitude - rates.ascending_node;

        Ok(MeanElements {
            semi_axis: self.semi_major_axis()? + rates.semi_axis * t,
            eccentricity: self.eccentricity + rates.eccentricity * t,
            inclination: (self.inclination + rates.inclination * t) * RADEG,
            ascending_node: ascending_node * RADEG,
            argument_of_perihelion: (self.argument_of_perihelion + perihelion_drift * t) * RADEG,
            mean_anomaly: (self.mean_anomaly + self.mean_daily_motion()? * (jd - self.epoch))
                * RADEG,
        })
    }
}

#[cfg(test)]
mod orbital_elements_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn comet_like() -> OrbitalElements {
        OrbitalElements {
            epoch: J2000,
            inclination: 10.0,
            ascending_node: 80.0,
            argument_of_perihelion: 150.0,
            semi_axis: None,
            perihelion_distance: Some(0.5),
            daily_motion: 0.0,
            eccentricity: 0.75,
            mean_anomaly: 0.0,
            equinox: J2000,
            rates: None,
        }
    }

    #[test]
    fn test_semi_axis_from_perihelion_distance() {
        let el = comet_like();
        assert_abs_diff_eq!(el.semi_major_axis().unwrap(), 2.0, epsilon = 1e-15);

        let mut broken = comet_like();
        broken.perihelion_distance = None;
        assert!(matches!(
            broken.semi_major_axis(),
            Err(EphemerisError::InvalidBodyRecord(_))
        ));
    }

    #[test]
    fn test_daily_motion_from_kepler_third_law() {
        let mut el = comet_like();
        el.semi_axis = Some(1.0);
        // k in degrees per day at 1 AU
        assert_abs_diff_eq!(el.mean_daily_motion().unwrap(), 0.985_607_668_6, epsilon = 1e-9);
    }

    #[test]
    fn test_from_mean_longitudes() {
        let el = OrbitalElements::from_mean_longitudes(
            0.38709927,
            0.20563593,
            7.00497902,
            252.25032350,
            77.45779628,
            48.33076593,
            149472.67411175,
            SecularRates {
                perihelion_longitude: 0.16047689,
                ascending_node: -0.12534081,
                ..SecularRates::default()
            },
        );
        assert_abs_diff_eq!(el.mean_anomaly, 174.79252722, epsilon = 1e-8);
        assert_abs_diff_eq!(el.argument_of_perihelion, 29.12703035, epsilon = 1e-8);
        assert_abs_diff_eq!(el.daily_motion, 4.092_334_391, epsilon = 1e-8);

        let later = el.at(J2000 + DAYS_PER_JULIAN_CENTURY).unwrap();
        assert_abs_diff_eq!(
            later.ascending_node / RADEG,
            48.33076593 - 0.12534081,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            later.argument_of_perihelion / RADEG,
            29.12703035 + 0.16047689 + 0.12534081,
            epsilon = 1e-9
        );
    }
}
