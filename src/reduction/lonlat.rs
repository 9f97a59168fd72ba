//! Ecliptic coordinates of date from equatorial J2000 vectors.

use nalgebra::Vector3;

use crate::{
    angles::EclipticCoordinates,
    constants::JulianDate,
    earth_orientation::{obleq, true_obliquity},
    ref_system::{equatorial_to_ecliptic, precess, RefEpoch},
};

/// Mean ecliptic coordinates of date of an equatorial J2000 vector.
///
/// The vector is precessed to the mean equinox of `jd` and rotated by the mean obliquity.
/// The distance is the length of the input vector.
pub fn ecliptic_of_date(v: &Vector3<f64>, jd: JulianDate) -> EclipticCoordinates {
    let of_date = precess(v, RefEpoch::J2000, RefEpoch::Date(jd));
    EclipticCoordinates::from_vector(&equatorial_to_ecliptic(&of_date, obleq(jd)))
}

/// True ecliptic coordinates of a vector already referred to the true equator and equinox of
/// date, rotated by the true obliquity.
pub fn apparent_ecliptic(v: &Vector3<f64>, jd: JulianDate) -> EclipticCoordinates {
    EclipticCoordinates::from_vector(&equatorial_to_ecliptic(v, true_obliquity(jd)))
}

#[cfg(test)]
mod lonlat_test {
    use super::*;
    use crate::angles::polar_to_rect;
    use crate::constants::{J2000, RADEG, RADSEC};
    use crate::ref_system::ecliptic_to_equatorial;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ecliptic_of_date_at_j2000() {
        let ecl = polar_to_rect(1.0, 0.1, 2.0);
        let eq = ecliptic_to_equatorial(&ecl, obleq(J2000));
        let back = ecliptic_of_date(&eq, J2000);
        assert_abs_diff_eq!(back.longitude, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(back.latitude, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(back.distance, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_general_precession_in_longitude() {
        // Ecliptic longitudes grow by about 50.29" per year.
        let eq = ecliptic_to_equatorial(&polar_to_rect(30.0 * RADEG, 0.0, 1.0), obleq(J2000));
        let later = ecliptic_of_date(&eq, J2000 + 36525.0);
        assert_abs_diff_eq!(
            (later.longitude - 30.0 * RADEG) / RADSEC / 100.0,
            50.29,
            epsilon = 0.05
        );
    }
}
