//! Topocentric place: hour angle, altitude and azimuth of a body for one observer.
//!
//! Starting from the apparent geocentric direction of date the corrections are, in order:
//! diurnal aberration, diurnal parallax (skipped for bodies at unknown distance), the
//! horizon transformation with the geodetic latitude, and atmospheric refraction.

use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    angles::{polar_to_rect, principal_angle, EquatorialCoordinates},
    constants::{AstronomicalUnit, Degree, Radian, DIURNAL_ABERRATION, RADEG},
    observer::Observer,
    time::local_apparent_sidereal_time,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Topocentric {
    pub local_apparent_sidereal_time: Radian,
    /// Local hour angle of the topocentric place, in [0, 2π)
    pub hour_angle: Radian,
    /// Topocentric right ascension and declination of date, before refraction
    pub topocentric: EquatorialCoordinates,
    /// Refracted altitude
    pub altitude: Degree,
    /// Azimuth from north through east
    pub azimuth: Degree,
    /// Refraction added to the geometric altitude
    pub refraction: Degree,
    /// Distance from the observer, when the geocentric distance is known
    pub distance: Option<AstronomicalUnit>,
}

/// Atmosphere used by the refraction model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Atmosphere {
    /// Celsius
    pub temperature: f64,
    /// Millibars
    pub pressure: f64,
}

/// Refraction for a geometric altitude, in degrees.
///
/// Sæmundsson's inversion of Bennett's formula, `1.02′ / tan(h + 10.3/(h + 5.11))`, scaled
/// by `(P/1010)·(283/(273 + T))`. Zero below −2° and at the zenith.
pub fn refraction(altitude: Degree, atmosphere: &Atmosphere) -> Degree {
    if !(-2.0..90.0).contains(&altitude) {
        return 0.0;
    }
    let r = 1.02 / ((altitude + 10.3 / (altitude + 5.11)) * RADEG).tan();
    let scale = (atmosphere.pressure / 1010.0) * (283.0 / (273.0 + atmosphere.temperature));
    r * scale / 60.0
}

/// Reduce an apparent geocentric place of date to the observer's horizon.
///
/// Arguments
/// ---------
/// * `apparent`: true equatorial direction of date.
/// * `distance`: geocentric distance (AU), `None` for stars without parallax.
/// * `observer`: site and instant.
/// * `atmosphere`: refraction conditions.
pub fn altaz(
    apparent: &EquatorialCoordinates,
    distance: Option<AstronomicalUnit>,
    observer: &Observer,
    atmosphere: &Atmosphere,
) -> Topocentric {
    let last = local_apparent_sidereal_time(
        observer.time.julian_utc,
        observer.time.julian_tt,
        observer.longitude,
    );

    // Diurnal aberration
    let mut ra = apparent.right_ascension;
    let mut dec = apparent.declination;
    let lha = last - ra;
    let k = DIURNAL_ABERRATION * observer.rho_cos_phi;
    let cos_dec = dec.cos();
    if cos_dec.abs() > f64::EPSILON {
        ra += k * lha.cos() / cos_dec;
    }
    dec += k * dec.sin() * lha.sin();

    // Diurnal parallax
    let (place, topo_distance) = match distance {
        Some(d) => {
            let p: Vector3<f64> = polar_to_rect(ra, dec, d) - observer.geocentric_position(last);
            (EquatorialCoordinates::from_vector(&p), Some(p.norm()))
        }
        None => (
            EquatorialCoordinates {
                right_ascension: principal_angle(ra),
                declination: dec,
            },
            None,
        ),
    };

    let hour_angle = principal_angle(last - place.right_ascension);
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_d, cos_d) = place.declination.sin_cos();
    let (sin_lat, cos_lat) = (observer.latitude * RADEG).sin_cos();

    let north = sin_d * cos_lat - cos_d * cos_h * sin_lat;
    let east = -cos_d * sin_h;
    let azimuth = principal_angle(east.atan2(north)) / RADEG;
    let geometric = (sin_d * sin_lat + cos_d * cos_h * cos_lat).clamp(-1.0, 1.0).asin() / RADEG;
    let refraction = refraction(geometric, atmosphere);

    Topocentric {
        local_apparent_sidereal_time: last,
        hour_angle,
        topocentric: place,
        altitude: geometric + refraction,
        azimuth,
        refraction,
        distance: topo_distance,
    }
}
