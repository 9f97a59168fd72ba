//! # Lunar theory
//!
//! Geocentric position of the Moon from the truncated ELP-2000/82 series of Meeus,
//! *Astronomical Algorithms* (2nd ed.), chapter 47: the 60 largest periodic terms in
//! longitude and distance, the 60 largest in latitude, and the additive terms for Venus,
//! Jupiter and the flattening of the Earth. Accuracy is about 10″ in longitude and 4″ in
//! latitude.
//!
//! The series gives coordinates referred to the mean ecliptic and equinox of date; the
//! reducer wants equatorial J2000 vectors, which [`moon_equatorial_j2000`] provides.
//!
//! [`MoonPhase`] describes the phase from the elongation of the Moon from the Sun.

use std::fmt;

use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    angles::{normalize_degrees, polar_to_rect},
    constants::{Degree, JulianDate, AU, RADEG, SYNODIC_MONTH},
    earth_orientation::obleq,
    ref_system::{ecliptic_to_equatorial, precess, RefEpoch},
    time::julian_centuries,
};

/// Periodic terms for longitude (1e-6 deg) and distance (1e-3 km): D, M, M′, F, Σl, Σr.
#[rustfmt::skip]
const LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, f64, f64); 60] = [
    (0, 0, 1, 0, 6288774.0, -20905355.0),
    (2, 0, -1, 0, 1274027.0, -3699111.0),
    (2, 0, 0, 0, 658314.0, -2955968.0),
    (0, 0, 2, 0, 213618.0, -569925.0),
    (0, 1, 0, 0, -185116.0, 48888.0),
    (0, 0, 0, 2, -114332.0, -3149.0),
    (2, 0, -2, 0, 58793.0, 246158.0),
    (2, -1, -1, 0, 57066.0, -152138.0),
    (2, 0, 1, 0, 53322.0, -170733.0),
    (2, -1, 0, 0, 45758.0, -204586.0),
    (0, 1, -1, 0, -40923.0, -129620.0),
    (1, 0, 0, 0, -34720.0, 108743.0),
    (0, 1, 1, 0, -30383.0, 104755.0),
    (2, 0, 0, -2, 15327.0, 10321.0),
    (0, 0, 1, 2, -12528.0, 0.0),
    (0, 0, 1, -2, 10980.0, 79661.0),
    (4, 0, -1, 0, 10675.0, -34782.0),
    (0, 0, 3, 0, 10034.0, -23210.0),
    (4, 0, -2, 0, 8548.0, -21636.0),
    (2, 1, -1, 0, -7888.0, 24208.0),
    (2, 1, 0, 0, -6766.0, 30824.0),
    (1, 0, -1, 0, -5163.0, -8379.0),
    (1, 1, 0, 0, 4987.0, -16675.0),
    (2, -1, 1, 0, 4036.0, -12831.0),
    (2, 0, 2, 0, 3994.0, -10445.0),
    (4, 0, 0, 0, 3861.0, -11650.0),
    (2, 0, -3, 0, 3665.0, 14403.0),
    (0, 1, -2, 0, -2689.0, -7003.0),
    (2, 0, -1, 2, -2602.0, 0.0),
    (2, -1, -2, 0, 2390.0, 10056.0),
    (1, 0, 1, 0, -2348.0, 6322.0),
    (2, -2, 0, 0, 2236.0, -9884.0),
    (0, 1, 2, 0, -2120.0, 5751.0),
    (0, 2, 0, 0, -2069.0, 0.0),
    (2, -2, -1, 0, 2048.0, -4950.0),
    (2, 0, 1, -2, -1773.0, 4130.0),
    (2, 0, 0, 2, -1595.0, 0.0),
    (4, -1, -1, 0, 1215.0, -3958.0),
    (0, 0, 2, 2, -1110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3258.0),
    (2, 1, 1, 0, -810.0, 2616.0),
    (4, -1, -2, 0, 759.0, -1897.0),
    (0, 2, -1, 0, -713.0, -2117.0),
    (2, 2, -1, 0, -700.0, 2354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1423.0),
    (0, 0, 4, 0, 537.0, -1117.0),
    (4, -1, 0, 0, 520.0, -1571.0),
    (1, 0, -2, 0, -487.0, -1739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8752.0),
];

/// Periodic terms for latitude (1e-6 deg): D, M, M′, F, Σb.
#[rustfmt::skip]
const LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 60] = [
    (0, 0, 0, 1, 5128122.0),
    (0, 0, 1, 1, 280602.0),
    (0, 0, 1, -1, 277693.0),
    (2, 0, 0, -1, 173237.0),
    (2, 0, -1, 1, 55413.0),
    (2, 0, -1, -1, 46271.0),
    (2, 0, 0, 1, 32573.0),
    (0, 0, 2, 1, 17198.0),
    (2, 0, 1, -1, 9266.0),
    (0, 0, 2, -1, 8822.0),
    (2, -1, 0, -1, 8216.0),
    (2, 0, -2, -1, 4324.0),
    (2, 0, 1, 1, 4200.0),
    (2, 1, 0, -1, -3359.0),
    (2, -1, -1, 1, 2463.0),
    (2, -1, 0, 1, 2211.0),
    (2, -1, -1, -1, 2065.0),
    (0, 1, -1, -1, -1870.0),
    (4, 0, -1, -1, 1828.0),
    (0, 1, 0, 1, -1794.0),
    (0, 0, 0, 3, -1749.0),
    (0, 1, -1, 1, -1565.0),
    (1, 0, 0, 1, -1491.0),
    (0, 1, 1, 1, -1475.0),
    (0, 1, 1, -1, -1410.0),
    (0, 1, 0, -1, -1344.0),
    (1, 0, 0, -1, -1335.0),
    (0, 0, 3, 1, 1107.0),
    (4, 0, 0, -1, 1021.0),
    (4, 0, -1, 1, 833.0),
    (0, 0, 1, -3, 777.0),
    (4, 0, -2, 1, 671.0),
    (2, 0, 0, -3, 607.0),
    (2, 0, 2, -1, 596.0),
    (2, -1, 1, -1, 491.0),
    (2, 0, -2, 1, -451.0),
    (0, 0, 3, -1, 439.0),
    (2, 0, 2, 1, 422.0),
    (2, 0, -3, -1, 421.0),
    (2, 1, -1, 1, -366.0),
    (2, 1, 0, 1, -351.0),
    (4, 0, 0, 1, 331.0),
    (2, -1, 1, 1, 315.0),
    (2, -2, 0, -1, 302.0),
    (0, 0, 1, 3, -283.0),
    (2, 1, 1, -1, -229.0),
    (1, 1, 0, -1, 223.0),
    (1, 1, 0, 1, 223.0),
    (0, 1, -2, -1, -220.0),
    (2, 1, -1, -1, -220.0),
    (1, 0, 1, 1, -185.0),
    (2, -1, -2, -1, 181.0),
    (0, 1, 2, 1, -177.0),
    (4, 0, -2, -1, 176.0),
    (4, -1, -1, -1, 166.0),
    (1, 0, 1, -1, -164.0),
    (4, 0, 1, -1, 132.0),
    (1, 0, -1, -1, -119.0),
    (4, -1, 0, -1, 115.0),
    (2, -2, 0, 1, 107.0),
];

/// Geocentric ecliptic coordinates of the Moon, mean ecliptic and equinox of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LunarPosition {
    pub longitude: Degree,
    pub latitude: Degree,
    /// Distance between the centres of the Earth and the Moon (km)
    pub distance: f64,
}

/// Fundamental arguments L′, D, M, M′, F in degrees, and the eccentricity factor E.
fn fundamental_arguments(t: f64) -> ([f64; 5], f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l = 218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538841.0 - t4 / 65194000.0;
    let d = 297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545868.0 - t4 / 113065000.0;
    let m = 357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24490000.0;
    let mp = 134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69699.0 - t4 / 14712000.0;
    let f = 93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3526000.0 + t4 / 863310000.0;

    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;

    (
        [
            normalize_degrees(l),
            normalize_degrees(d),
            normalize_degrees(m),
            normalize_degrees(mp),
            normalize_degrees(f),
        ],
        e,
    )
}

/// Argument of one periodic term in radians, and its eccentricity weight.
fn term_argument(d: f64, m: f64, mp: f64, f: f64, mult: (i8, i8, i8, i8), e: f64) -> (f64, f64) {
    let (cd, cm, cmp, cf) = mult;
    let arg = (cd as f64 * d + cm as f64 * m + cmp as f64 * mp + cf as f64 * f) * RADEG;
    let weight = match cm.abs() {
        0 => 1.0,
        1 => e,
        _ => e * e,
    };
    (arg, weight)
}

/// Position of the Moon at `jd_tt`.
pub fn geocentric_moon(jd_tt: JulianDate) -> LunarPosition {
    let t = julian_centuries(jd_tt);
    let ([l, d, m, mp, f], e) = fundamental_arguments(t);

    let a1 = (119.75 + 131.849 * t) * RADEG;
    let a2 = (53.09 + 479264.290 * t) * RADEG;
    let a3 = (313.45 + 481266.484 * t) * RADEG;

    let (mut sum_l, sum_r) = LONGITUDE_DISTANCE_TERMS.iter().fold(
        (0.0, 0.0),
        |(sl, sr), &(cd, cm, cmp, cf, coef_l, coef_r)| {
            let (arg, w) = term_argument(d, m, mp, f, (cd, cm, cmp, cf), e);
            (sl + coef_l * w * arg.sin(), sr + coef_r * w * arg.cos())
        },
    );

    let mut sum_b: f64 = LATITUDE_TERMS
        .iter()
        .map(|&(cd, cm, cmp, cf, coef)| {
            let (arg, w) = term_argument(d, m, mp, f, (cd, cm, cmp, cf), e);
            coef * w * arg.sin()
        })
        .sum();

    let (l_rad, mp_rad, f_rad) = (l * RADEG, mp * RADEG, f * RADEG);

    // Venus, Jupiter and the flattening of the Earth
    sum_l += 3958.0 * a1.sin() + 1962.0 * (l_rad - f_rad).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * l_rad.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f_rad).sin()
        + 175.0 * (a1 + f_rad).sin()
        + 127.0 * (l_rad - mp_rad).sin()
        - 115.0 * (l_rad + mp_rad).sin();

    LunarPosition {
        longitude: normalize_degrees(l + sum_l / 1e6),
        latitude: sum_b / 1e6,
        distance: 385_000.56 + sum_r / 1000.0,
    }
}

/// Geocentric equatorial vector of the Moon (AU), mean equator and equinox J2000.
pub fn moon_equatorial_j2000(jd_tt: JulianDate) -> Vector3<f64> {
    let pos = geocentric_moon(jd_tt);
    let ecliptic = polar_to_rect(
        pos.longitude * RADEG,
        pos.latitude * RADEG,
        pos.distance / AU,
    );
    let of_date = ecliptic_to_equatorial(&ecliptic, obleq(jd_tt));
    precess(&of_date, RefEpoch::Date(jd_tt), RefEpoch::J2000)
}

/// Principal phase of the Moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LunarQuarter {
    NewMoon,
    FirstQuarter,
    FullMoon,
    LastQuarter,
}

impl fmt::Display for LunarQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LunarQuarter::NewMoon => "New Moon",
            LunarQuarter::FirstQuarter => "First Quarter",
            LunarQuarter::FullMoon => "Full Moon",
            LunarQuarter::LastQuarter => "Last Quarter",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonPhase {
    /// Moon longitude minus Sun longitude, in [0, 360)
    pub elongation: Degree,
    pub illuminated_fraction: f64,
    /// Days since the last new Moon, at the mean synodic rate
    pub age: f64,
    pub waxing: bool,
    /// Set when the elongation lies within the quarter window of 0, 90, 180 or 270 degrees.
    pub quarter: Option<LunarQuarter>,
}

impl MoonPhase {
    /// Phase from the apparent longitudes of the Moon and the Sun.
    ///
    /// Arguments
    /// ---------
    /// * `moon_longitude`, `sun_longitude`: ecliptic longitudes of date (deg).
    /// * `illuminated_fraction`: fraction of the disc lit, from the phase angle.
    /// * `quarter_approximation`: half-width of the quarter window (deg).
    pub fn new(
        moon_longitude: Degree,
        sun_longitude: Degree,
        illuminated_fraction: f64,
        quarter_approximation: Degree,
    ) -> Self {
        let elongation = normalize_degrees(moon_longitude - sun_longitude);

        let quarter = [
            (0.0, LunarQuarter::NewMoon),
            (90.0, LunarQuarter::FirstQuarter),
            (180.0, LunarQuarter::FullMoon),
            (270.0, LunarQuarter::LastQuarter),
            (360.0, LunarQuarter::NewMoon),
        ]
        .into_iter()
        .find(|(target, _)| (elongation - target).abs() <= quarter_approximation)
        .map(|(_, q)| q);

        MoonPhase {
            elongation,
            illuminated_fraction,
            age: elongation / (360.0 / SYNODIC_MONTH),
            waxing: elongation < 180.0,
            quarter,
        }
    }
}
