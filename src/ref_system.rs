//! Reference frames and the transformations between them.
//!
//! All matrices are *passive*: they re-express a fixed vector in a rotated frame,
//! `x_new = R · x_old`. Every equatorial vector of the crate is expressed in one of the frames
//! named by [`RefEpoch`]; ecliptic vectors are obtained by a rotation about the X axis by the
//! obliquity of the same epoch.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{JulianDate, Radian, B1875, B1950, J2000},
    earth_orientation::precession_matrix,
};

/// Coordinate axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Elementary frame rotation by `alpha` radians about `axis`.
///
/// For `Axis::Z` the result maps `(cos λ, sin λ, 0)` to `(cos(λ-α), sin(λ-α), 0)`:
/// the frame turns by `alpha`, the coordinates of the vector turn by `-alpha`.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let unit = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&unit, -alpha).into()
}

/// Mean equator and equinox a vector is referred to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefEpoch {
    J2000,
    B1950,
    B1875,
    /// Mean equator and equinox of a Julian date (TT).
    Date(JulianDate),
}

impl RefEpoch {
    pub fn julian_date(&self) -> JulianDate {
        match self {
            RefEpoch::J2000 => J2000,
            RefEpoch::B1950 => B1950,
            RefEpoch::B1875 => B1875,
            RefEpoch::Date(jd) => *jd,
        }
    }
}

/// Precession matrix taking mean coordinates of `from` to mean coordinates of `to`.
pub fn precession_between(from: RefEpoch, to: RefEpoch) -> Matrix3<f64> {
    if from == to {
        return Matrix3::identity();
    }
    let to_date = precession_matrix(to.julian_date());
    let from_date = precession_matrix(from.julian_date());
    to_date * from_date.transpose()
}

/// Precess an equatorial vector between two mean equinoxes.
pub fn precess(v: &Vector3<f64>, from: RefEpoch, to: RefEpoch) -> Vector3<f64> {
    precession_between(from, to) * v
}

/// Rotate an equatorial vector onto the ecliptic of the given obliquity.
pub fn equatorial_to_ecliptic(v: &Vector3<f64>, obliquity: Radian) -> Vector3<f64> {
    rotmt(obliquity, Axis::X) * v
}

/// Rotate an ecliptic vector onto the equator of the given obliquity.
pub fn ecliptic_to_equatorial(v: &Vector3<f64>, obliquity: Radian) -> Vector3<f64> {
    rotmt(-obliquity, Axis::X) * v
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use crate::angles::{polar_to_rect, EquatorialCoordinates};
    use crate::constants::RADSEC;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotmt_is_passive() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let r = rotmt(0.3, Axis::Z) * v;
        assert_abs_diff_eq!(r.x, 0.3f64.cos(), epsilon = 1e-15);
        assert_abs_diff_eq!(r.y, -(0.3f64.sin()), epsilon = 1e-15);

        let m = rotmt(0.7, Axis::Y) * rotmt(-0.7, Axis::Y);
        assert_abs_diff_eq!(m, Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_precession_round_trip() {
        let v = polar_to_rect(1.234, -0.456, 1.0);
        let date = RefEpoch::Date(2_458_787.5);
        let there = precess(&v, RefEpoch::J2000, date);
        let back = precess(&there, date, RefEpoch::J2000);
        assert_abs_diff_eq!((back - v).norm(), 0.0, epsilon = 1e-12);

        let far = RefEpoch::Date(2_451_545.0 + 365.25 * 3000.0);
        let back = precess(&precess(&v, RefEpoch::J2000, far), far, RefEpoch::J2000);
        let before = EquatorialCoordinates::from_vector(&v);
        let after = EquatorialCoordinates::from_vector(&back);
        assert_abs_diff_eq!(before.right_ascension, after.right_ascension, epsilon = 1e-9);
        assert_abs_diff_eq!(before.declination, after.declination, epsilon = 1e-9);
    }

    #[test]
    fn test_precession_rate_at_equinox() {
        // A point at RA = Dec = 0 moves by ζ + z in RA and θ in Dec per year.
        let v = Vector3::new(1.0, 0.0, 0.0);
        let one_year = RefEpoch::Date(J2000 + 365.25);
        let p = EquatorialCoordinates::from_vector(&precess(&v, RefEpoch::J2000, one_year));
        assert_abs_diff_eq!(p.right_ascension / RADSEC, 46.124, epsilon = 0.01);
        assert_abs_diff_eq!(p.declination / RADSEC, 20.043, epsilon = 0.01);
    }

    #[test]
    fn test_b1950_precession_is_negative() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let p = EquatorialCoordinates::from_vector(&precess(&v, RefEpoch::J2000, RefEpoch::B1950));
        // Fifty years back: RA wraps just below 2π, Dec goes south.
        assert!(p.right_ascension > 6.2);
        assert!(p.declination < 0.0);
    }

    #[test]
    fn test_ecliptic_round_trip() {
        let v = polar_to_rect(2.0, 0.3, 4.0);
        let eps = 0.409;
        let back = ecliptic_to_equatorial(&equatorial_to_ecliptic(&v, eps), eps);
        assert_abs_diff_eq!((back - v).norm(), 0.0, epsilon = 1e-14);

        // The north ecliptic pole sits at RA 18h, Dec 90° - ε.
        let pole = ecliptic_to_equatorial(&Vector3::new(0.0, 0.0, 1.0), eps);
        let eq = EquatorialCoordinates::from_vector(&pole);
        assert_abs_diff_eq!(eq.ra_hours(), 18.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eq.declination, std::f64::consts::FRAC_PI_2 - eps, epsilon = 1e-12);
    }
}
