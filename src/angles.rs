//! Angle arithmetic and the spherical forms of rectangular vectors.
//!
//! Everything here is a leaf: plain functions over `f64` and [`Vector3`], plus the small
//! value types the reducer reports (equatorial and ecliptic polar coordinates, sexagesimal
//! renderings and angular corrections).

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Vector3;
use serde::Serialize;

use crate::constants::{ArcSec, Degree, Radian, DPI, RADEG, RADH, RADSEC};

/// Principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Principal difference `a - b` between two angles, in [-π, π].
pub fn angle_diff(a: Radian, b: Radian) -> Radian {
    let mut diff = principal_angle(a) - principal_angle(b);
    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }
    diff
}

/// Reduce an angle in degrees to [0, 360).
pub fn normalize_degrees(a: Degree) -> Degree {
    a.rem_euclid(360.0)
}

/// `(a - b)` reduced to [0, modulus).
pub fn modulo_difference(a: f64, b: f64, modulus: f64) -> f64 {
    (a - b).rem_euclid(modulus)
}

/// Map a difference taken in [0, modulus) onto the signed interval (-modulus/2, modulus/2].
pub fn correct_real_modulo_number(diff: f64, modulus: f64) -> f64 {
    if diff > modulus / 2.0 {
        diff - modulus
    } else {
        diff
    }
}

/// Signed shortest-path difference from `from` to `to`, in degrees.
///
/// The result lies in (-180, 180] and satisfies `from + diff ≡ to (mod 360)`.
pub fn signed_difference(from: Degree, to: Degree) -> Degree {
    correct_real_modulo_number(modulo_difference(to, from, 360.0), 360.0)
}

/// Position of a whole degree inside its 30° zodiac sign.
pub fn mod30(degree: u32) -> u32 {
    degree % 30
}

/// Rectangular vector from spherical coordinates.
pub fn polar_to_rect(longitude: Radian, latitude: Radian, radius: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();
    Vector3::new(
        radius * cos_lat * cos_lon,
        radius * cos_lat * sin_lon,
        radius * sin_lat,
    )
}

/// An angle split into whole units, minutes and seconds.
///
/// The same structure renders degrees (`D°M'S"`) and hours (`HhMmSs`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sexagesimal {
    pub negative: bool,
    pub whole: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Sexagesimal {
    pub fn from_value(value: f64) -> Self {
        let negative = value < 0.0;
        let a = value.abs();
        let whole = a.floor();
        let m = (a - whole) * 60.0;
        let minutes = m.floor();
        let seconds = (m - minutes) * 60.0;
        Sexagesimal {
            negative,
            whole: whole as u32,
            minutes: minutes as u32,
            seconds,
        }
    }

    pub fn from_degrees(value: Degree) -> Self {
        Self::from_value(value)
    }

    pub fn from_hours(value: f64) -> Self {
        Self::from_value(value)
    }

    fn sign(&self) -> &'static str {
        if self.negative {
            "-"
        } else {
            ""
        }
    }

    /// `D°M'S"` with the seconds truncated, e.g. `237°38'16"`.
    pub fn compact(&self) -> String {
        format!(
            "{}{}\u{00B0}{}'{}\"",
            self.sign(),
            self.whole,
            self.minutes,
            self.seconds.floor() as u32
        )
    }

    /// Same as [`Sexagesimal::compact`] with the degrees taken modulo 30.
    pub fn compact_mod30(&self) -> String {
        format!(
            "{}{}\u{00B0}{}'{}\"",
            self.sign(),
            mod30(self.whole),
            self.minutes,
            self.seconds.floor() as u32
        )
    }

    pub fn to_degrees_string(&self) -> String {
        format!(
            "{}{}\u{00B0} {:02}' {:05.2}\"",
            self.sign(),
            self.whole,
            self.minutes,
            self.seconds
        )
    }

    pub fn to_hours_string(&self) -> String {
        format!(
            "{}{}h {:02}m {:06.3}s",
            self.sign(),
            self.whole,
            self.minutes,
            self.seconds
        )
    }
}

/// Right ascension and declination of a direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquatorialCoordinates {
    pub right_ascension: Radian,
    pub declination: Radian,
}

impl EquatorialCoordinates {
    /// Spherical form of an equatorial rectangular vector of any length.
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        let r = v.norm();
        EquatorialCoordinates {
            right_ascension: principal_angle(v.y.atan2(v.x)),
            declination: (v.z / r).asin(),
        }
    }

    pub fn ra_hours(&self) -> f64 {
        self.right_ascension / RADH
    }

    pub fn ra_degrees(&self) -> Degree {
        self.right_ascension / RADEG
    }

    pub fn dec_degrees(&self) -> Degree {
        self.declination / RADEG
    }

    pub fn ra_hms(&self) -> Sexagesimal {
        Sexagesimal::from_hours(self.ra_hours())
    }

    pub fn dec_dms(&self) -> Sexagesimal {
        Sexagesimal::from_degrees(self.dec_degrees())
    }
}

impl fmt::Display for EquatorialCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R.A. {}  Dec. {}",
            self.ra_hms().to_hours_string(),
            self.dec_dms().to_degrees_string()
        )
    }
}

/// Ecliptic longitude, latitude and distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipticCoordinates {
    pub longitude: Radian,
    pub latitude: Radian,
    pub distance: f64,
}

impl EclipticCoordinates {
    /// Spherical form of an ecliptic rectangular vector.
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        let r = v.norm();
        EclipticCoordinates {
            longitude: principal_angle(v.y.atan2(v.x)),
            latitude: (v.z / r).asin(),
            distance: r,
        }
    }

    pub fn longitude_degrees(&self) -> Degree {
        self.longitude / RADEG
    }

    pub fn latitude_degrees(&self) -> Degree {
        self.latitude / RADEG
    }

    pub fn longitude_dms(&self) -> Sexagesimal {
        Sexagesimal::from_degrees(self.longitude_degrees())
    }
}

impl fmt::Display for EclipticCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "λ {}  β {}  r {:.9}",
            self.longitude_dms().to_degrees_string(),
            Sexagesimal::from_degrees(self.latitude_degrees()).to_degrees_string(),
            self.distance
        )
    }
}

/// Shift in right ascension and declination produced by one correction step, in arcseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AngularCorrection {
    pub d_ra: ArcSec,
    pub d_dec: ArcSec,
}

impl AngularCorrection {
    pub fn between(before: &Vector3<f64>, after: &Vector3<f64>) -> Self {
        let b = EquatorialCoordinates::from_vector(before);
        let a = EquatorialCoordinates::from_vector(after);
        AngularCorrection {
            d_ra: angle_diff(a.right_ascension, b.right_ascension) / RADSEC,
            d_dec: (a.declination - b.declination) / RADSEC,
        }
    }
}

#[cfg(test)]
mod angles_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_angle_diff_wraps() {
        assert_abs_diff_eq!(angle_diff(0.1, DPI - 0.1), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_diff(DPI - 0.1, 0.1), -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(principal_angle(-0.5), DPI - 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_difference_properties() {
        let samples = [0.0, 0.5, 45.0, 179.9, 180.0, 180.1, 237.6, 359.99];
        for &a in &samples {
            for &b in &samples {
                let diff = signed_difference(a, b);
                assert!(diff.abs() <= 180.0, "{a} -> {b} gave {diff}");
                assert_abs_diff_eq!(
                    normalize_degrees(a + diff),
                    normalize_degrees(b),
                    epsilon = 1e-9
                );
            }
        }
        assert_abs_diff_eq!(signed_difference(359.0, 1.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(signed_difference(1.0, 359.0), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_modulo_helpers() {
        assert_abs_diff_eq!(modulo_difference(10.0, 350.0, 360.0), 20.0);
        assert_abs_diff_eq!(correct_real_modulo_number(350.0, 360.0), -10.0);
        assert_abs_diff_eq!(correct_real_modulo_number(20.0, 360.0), 20.0);
        assert_eq!(mod30(237), 27);
        assert_eq!(mod30(29), 29);
    }

    #[test]
    fn test_sexagesimal_strings() {
        let s = Sexagesimal::from_degrees(237.637_859_082_199_3);
        assert_eq!(s.whole, 237);
        assert_eq!(s.minutes, 38);
        assert_eq!(s.compact(), "237\u{00B0}38'16\"");
        assert_eq!(s.compact_mod30(), "27\u{00B0}38'16\"");

        let neg = Sexagesimal::from_degrees(-20.5);
        assert!(neg.negative);
        assert_eq!(neg.to_degrees_string(), "-20\u{00B0} 30' 00.00\"");

        let hours = Sexagesimal::from_hours(6.5);
        assert_eq!(hours.to_hours_string(), "6h 30m 00.000s");
    }

    #[test]
    fn test_equatorial_from_vector() {
        let v = polar_to_rect(3.0, -0.4, 2.5);
        let eq = EquatorialCoordinates::from_vector(&v);
        assert_abs_diff_eq!(eq.right_ascension, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eq.declination, -0.4, epsilon = 1e-12);

        let ecl = EclipticCoordinates::from_vector(&v);
        assert_abs_diff_eq!(ecl.distance, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_correction_between() {
        let before = polar_to_rect(DPI - 1e-6, 0.0, 1.0);
        let after = polar_to_rect(1e-6, 1e-6, 1.0);
        let corr = AngularCorrection::between(&before, &after);
        assert_abs_diff_eq!(corr.d_ra, 2e-6 / RADSEC, epsilon = 1e-6);
        assert_abs_diff_eq!(corr.d_dec, 1e-6 / RADSEC, epsilon = 1e-6);
    }
}
