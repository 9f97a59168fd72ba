use hifitime::Epoch;
use serde::Serialize;

use crate::{
    angles::principal_angle,
    constants::{
        Degree, JulianDate, Radian, B1950, DAYS_PER_BESSELIAN_YEAR, DAYS_PER_JULIAN_CENTURY,
        DAYS_PER_JULIAN_YEAR, DPI, J1900, J2000, JDTOMJD, MJD, RADEG, SECONDS_PER_DAY, T2000,
    },
    earth_orientation::equequ,
};

/// Every time scale a reduction needs, derived once from a UTC instant.
///
/// `julian_tt` drives the orbit solver and the frame models; `julian_utc` drives the
/// sidereal time (UT1 is approximated by UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeScales {
    pub julian_utc: JulianDate,
    pub julian_tt: JulianDate,
    /// TT − UTC in seconds
    pub delta_t: f64,
    /// Julian epoch year, e.g. 2019.83
    pub j2000: f64,
    /// Besselian epoch year
    pub b1950: f64,
    /// Julian epoch year counted from J1900
    pub j1900: f64,
}

impl TimeScales {
    pub fn from_epoch(epoch: &Epoch) -> Self {
        let julian_utc = epoch.to_jde_utc_days();
        let julian_tt = epoch.to_jde_tt_days();
        TimeScales {
            julian_utc,
            julian_tt,
            delta_t: (julian_tt - julian_utc) * SECONDS_PER_DAY,
            j2000: julian_epoch(julian_utc),
            b1950: besselian_epoch(julian_utc),
            j1900: j1900_epoch(julian_utc),
        }
    }
}

/// Julian centuries elapsed since J2000.
pub fn julian_centuries(jd: JulianDate) -> f64 {
    (jd - J2000) / DAYS_PER_JULIAN_CENTURY
}

pub fn julian_epoch(jd: JulianDate) -> f64 {
    2000.0 + (jd - J2000) / DAYS_PER_JULIAN_YEAR
}

pub fn besselian_epoch(jd: JulianDate) -> f64 {
    1950.0 + (jd - B1950) / DAYS_PER_BESSELIAN_YEAR
}

pub fn j1900_epoch(jd: JulianDate) -> f64 {
    1900.0 + (jd - J1900) / DAYS_PER_JULIAN_YEAR
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// IAU 1982 polynomial for the sidereal time at 0h UT1, plus the fraction of the day
/// scaled by the ratio of sidereal to solar day.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / DAYS_PER_JULIAN_CENTURY;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * (DPI / SECONDS_PER_DAY);

    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}

/// Local apparent sidereal time in radians, in [0, 2π).
///
/// Arguments
/// ---------
/// * `jd_ut`: Julian date on the UT scale (UTC stands in for UT1).
/// * `jd_tt`: the same instant on TT, used for the equation of the equinoxes.
/// * `east_longitude`: observer longitude, positive east, in degrees.
pub fn local_apparent_sidereal_time(
    jd_ut: JulianDate,
    jd_tt: JulianDate,
    east_longitude: Degree,
) -> Radian {
    principal_angle(gmst(jd_ut - JDTOMJD) + equequ(jd_tt) + east_longitude * RADEG)
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        let res_gmst = gmst(tut);
        assert_eq!(res_gmst, 4.851925725092499);

        let tut = T2000;
        let res_gmst = gmst(tut);
        assert_eq!(res_gmst, 4.894961212789145);
    }

    #[test]
    fn test_time_scales_at_j2000() {
        let epoch = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
        let ts = TimeScales::from_epoch(&epoch);

        assert_abs_diff_eq!(ts.julian_utc, J2000, epsilon = 1e-9);
        assert_abs_diff_eq!(ts.delta_t, 64.184, epsilon = 1e-3);
        assert_abs_diff_eq!(ts.julian_tt, J2000 + 64.184 / SECONDS_PER_DAY, epsilon = 1e-8);
        assert_abs_diff_eq!(ts.j2000, 2000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ts.j1900, 2000.0, epsilon = 1e-2);
        assert_abs_diff_eq!(ts.b1950, 2000.0, epsilon = 2e-3);
    }

    #[test]
    fn test_delta_t_2019() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2019, 10, 31);
        let ts = TimeScales::from_epoch(&epoch);
        // 37 leap seconds + 32.184 s
        assert_abs_diff_eq!(ts.delta_t, 69.184, epsilon = 1e-3);
        assert_abs_diff_eq!(ts.julian_utc, 2_458_787.5, epsilon = 1e-9);
    }

    #[test]
    fn test_local_sidereal_time_east_shift() {
        let jd = 2_458_787.5;
        let greenwich = local_apparent_sidereal_time(jd, jd, 0.0);
        let east = local_apparent_sidereal_time(jd, jd, 90.0);
        assert_abs_diff_eq!(
            angle_wrap(east - greenwich),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    fn angle_wrap(a: f64) -> f64 {
        principal_angle(a)
    }
}
