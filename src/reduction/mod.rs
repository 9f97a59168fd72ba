//! # Apparent-position reduction
//!
//! This module turns a catalog [`Body`] into its [`ApparentPosition`] for one observer at
//! one instant. The Earth is solved beforehand ([`EarthState`]) and shared by every body
//! reduced at the same instant.
//!
//! ## Pipeline
//!
//! 1. **Geocentric place**, per body kind:
//!    heliocentric orbit (Kepler) or lunar theory or catalog star, light-time iteration,
//!    Sun–object–Earth geometry and photometry.
//! 2. **Direction-only corrections**, shared by every kind:
//!    astrometric J2000 / B1950 place, gravitational deflection, annual aberration,
//!    precession to the mean equinox of date, nutation, constellation.
//! 3. **Apparent place**: right ascension and declination of date, true ecliptic longitude
//!    with its sexagesimal renderings.
//! 4. **Topocentric place** ([`altaz`]): sidereal time, diurnal aberration and parallax,
//!    altitude and azimuth with refraction.
//!
//! The sub-modules hold the individual steps; each is a pure function on [`Vector3`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use ephemeris::bodies::catalog::BodyCatalog;
//! use ephemeris::earth::EarthState;
//! use ephemeris::observer::Observer;
//! use ephemeris::reduction::{reduce_body, ReductionParams};
//!
//! let catalog = BodyCatalog::builtin();
//! let observer = Observer::from_gregorian_utc(2019, 10, 31, 0, 0, 0, 48.85, 2.35, 35.0)?;
//! let params = ReductionParams::default();
//! let earth = EarthState::compute(
//!     catalog.earth_elements()?,
//!     observer.time.julian_tt,
//!     params.kepler_tolerance,
//!     params.kepler_max_iterations,
//! )?;
//!
//! let mars = reduce_body(catalog.get("mars")?, &earth, &observer, &params)?;
//! println!("{} in {}", mars.apparent, mars.constellation);
//! # Ok::<(), ephemeris::ephemeris_errors::EphemerisError>(())
//! ```
use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use log::debug;
use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    angles::{AngularCorrection, EclipticCoordinates, EquatorialCoordinates, Sexagesimal},
    bodies::{star::StarCoordinates, Body, BodyKind, BodyType},
    constants::{ArcSec, AstronomicalUnit, Degree, JulianDate, VLIGHT_AU},
    earth::EarthState,
    earth_orientation::nutation_matrix,
    ephemeris_errors::EphemerisError,
    kepler::heliocentric_position,
    lunar::{moon_equatorial_j2000, MoonPhase},
    observer::Observer,
    reduction::{
        aberration::annual_aberration,
        altaz::{altaz, Atmosphere, Topocentric},
        constellation::{constellation_of, Constellation},
        deflection::deflect,
        geometry::{sun_magnitude, ObjectGeometry},
        light_time::light_time_correct,
        lonlat::{apparent_ecliptic, ecliptic_of_date},
    },
    ref_system::{precess, RefEpoch},
};

pub mod aberration;
pub mod altaz;
pub mod constellation;
mod constellation_data;
pub mod deflection;
pub mod geometry;
pub mod light_time;
pub mod lonlat;

/// Tolerance on the agreement between the Earth state and the observer instant (days)
const EARTH_EPOCH_TOLERANCE: f64 = 1e-9;

/// Numerical and atmospheric settings of a reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionParams {
    /// Absolute tolerance on the Kepler Newton step (rad)
    pub kepler_tolerance: f64,
    pub kepler_max_iterations: usize,
    /// Re-evaluations of the body in the light-time loop
    pub light_time_iterations: usize,
    /// Air temperature for refraction (°C)
    pub temperature: f64,
    /// Air pressure for refraction (mbar)
    pub pressure: f64,
}

impl ReductionParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ReductionParamsBuilder {
        ReductionParamsBuilder::new()
    }

    pub fn atmosphere(&self) -> Atmosphere {
        Atmosphere {
            temperature: self.temperature,
            pressure: self.pressure,
        }
    }
}

impl Default for ReductionParams {
    fn default() -> Self {
        ReductionParams {
            kepler_tolerance: 1e-11,
            kepler_max_iterations: 64,
            light_time_iterations: 2,
            temperature: 12.0,
            pressure: 1010.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReductionParamsBuilder {
    params: ReductionParams,
}

impl Default for ReductionParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReductionParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: ReductionParams::default(),
        }
    }

    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }
    pub fn kepler_max_iterations(mut self, v: usize) -> Self {
        self.params.kepler_max_iterations = v;
        self
    }
    pub fn light_time_iterations(mut self, v: usize) -> Self {
        self.params.light_time_iterations = v;
        self
    }
    pub fn temperature(mut self, v: f64) -> Self {
        self.params.temperature = v;
        self
    }
    pub fn pressure(mut self, v: f64) -> Self {
        self.params.pressure = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Validation rules
    /// -----------------
    /// * `kepler_tolerance > 0`, `kepler_max_iterations ≥ 1`.
    /// * `pressure ≥ 0` (zero disables refraction).
    /// * `temperature > −273.15`.
    ///
    /// `light_time_iterations = 0` is accepted and yields geometric positions.
    pub fn build(self) -> Result<ReductionParams, EphemerisError> {
        let p = &self.params;

        if p.kepler_tolerance.partial_cmp(&0.0) != Some(Greater) {
            return Err(EphemerisError::InvalidParameter(
                "kepler_tolerance must be > 0".into(),
            ));
        }
        if p.kepler_max_iterations == 0 {
            return Err(EphemerisError::InvalidParameter(
                "kepler_max_iterations must be >= 1".into(),
            ));
        }
        if !matches!(p.pressure.partial_cmp(&0.0), Some(Greater) | Some(Equal)) {
            return Err(EphemerisError::InvalidParameter(
                "pressure must be >= 0".into(),
            ));
        }
        if p.temperature.partial_cmp(&-273.15) != Some(Greater) {
            return Err(EphemerisError::InvalidParameter(
                "temperature must be above absolute zero".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for ReductionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 40;
            writeln!(f, "Reduction Parameters")?;
            writeln!(f, "--------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Orbit solver]")?;
            line!(
                "kepler_tolerance      = {:.1e}",
                self.kepler_tolerance,
                "Newton step tolerance (rad)"
            )?;
            line!(
                "kepler_max_iterations = {}",
                self.kepler_max_iterations,
                "Newton iteration cap"
            )?;
            line!(
                "light_time_iterations = {}",
                self.light_time_iterations,
                "Light-time re-evaluations"
            )?;

            writeln!(f, "\n[Atmosphere]")?;
            line!(
                "temperature           = {:.1} C",
                self.temperature,
                "Air temperature for refraction"
            )?;
            line!(
                "pressure              = {:.1} mbar",
                self.pressure,
                "Air pressure for refraction"
            )?;

            Ok(())
        } else {
            write!(
                f,
                "ReductionParams(kepler_tolerance={:.1e}, kepler_max_iterations={}, light_time_iterations={}, T={:.1}C, P={:.1}mbar)",
                self.kepler_tolerance,
                self.kepler_max_iterations,
                self.light_time_iterations,
                self.temperature,
                self.pressure,
            )
        }
    }
}

/// Everything the reducer reports for one body at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApparentPosition {
    pub key: String,
    pub body_type: BodyType,
    /// Instant of the reduction (JD, TT)
    pub jd_tt: JulianDate,

    /// Geometric ecliptic coordinates of date, mean equinox. Heliocentric for planets,
    /// geocentric for the Moon, absent for the Sun and stars.
    pub geometric: Option<EclipticCoordinates>,
    /// Light travel time (days)
    pub light_time: f64,
    pub geometry: Option<ObjectGeometry>,
    /// Distance from the uncorrected heliocentric position; infinite for a star without
    /// parallax
    pub true_geocentric_distance: AstronomicalUnit,
    /// Distance of the light-time corrected position
    pub geocentric_distance: Option<AstronomicalUnit>,

    pub magnitude: f64,
    /// Illuminated fraction of the disc
    pub phase: f64,
    pub equatorial_diameter: ArcSec,

    pub astrometric_j2000: EquatorialCoordinates,
    pub astrometric_b1950: EquatorialCoordinates,
    pub deflection: AngularCorrection,
    pub aberration: AngularCorrection,
    pub nutation: AngularCorrection,

    /// Right ascension and declination of date, true equator and equinox
    pub apparent: EquatorialCoordinates,
    pub constellation: Constellation,
    pub apparent_ecliptic: EclipticCoordinates,
    pub apparent_longitude: Degree,
    /// `D°M'S"`, seconds floored
    pub apparent_longitude_string: String,
    /// Same as `apparent_longitude_string` with the degrees taken modulo 30
    pub apparent_longitude_30_string: String,

    pub topocentric: Topocentric,
    pub moon_phase: Option<MoonPhase>,
}

/// Light-time corrected geocentric place of a body, with its photometry.
#[derive(Debug, Clone)]
struct GeocentricPlace {
    geometric: Option<EclipticCoordinates>,
    light_time: f64,
    geometry: Option<ObjectGeometry>,
    true_geocentric_distance: AstronomicalUnit,
    geocentric_distance: Option<AstronomicalUnit>,
    magnitude: f64,
    phase: f64,
    equatorial_diameter: ArcSec,
    /// Geocentric equatorial J2000 vector
    p: Vector3<f64>,
    /// Heliocentric vector of the body when the Sun deflects its light
    deflector: Option<Vector3<f64>>,
}

/// Direction of a body after the direction-only corrections.
#[derive(Debug, Clone)]
struct ApparentDirection {
    astrometric_j2000: EquatorialCoordinates,
    astrometric_b1950: EquatorialCoordinates,
    deflection: AngularCorrection,
    aberration: AngularCorrection,
    nutation: AngularCorrection,
    apparent: EquatorialCoordinates,
    constellation: Constellation,
    ecliptic: EclipticCoordinates,
}

fn sun_place(body: &Body, earth: &EarthState) -> GeocentricPlace {
    let sun_earth = earth.distance_to_sun();
    GeocentricPlace {
        geometric: None,
        light_time: sun_earth / VLIGHT_AU,
        geometry: None,
        true_geocentric_distance: sun_earth,
        geocentric_distance: Some(sun_earth),
        magnitude: sun_magnitude(body.magnitude, sun_earth),
        phase: 1.0,
        equatorial_diameter: 2.0 * body.semi_diameter / sun_earth,
        p: -earth.position,
        deflector: None,
    }
}

/// Place of a body with a heliocentric position `q0` at `jd`, re-evaluated by `position_at`
/// along the light-time loop.
fn solar_system_place<F>(
    body: &Body,
    earth: &EarthState,
    q0: Vector3<f64>,
    geometric: EclipticCoordinates,
    params: &ReductionParams,
    position_at: F,
) -> Result<GeocentricPlace, EphemerisError>
where
    F: FnMut(JulianDate) -> Result<Vector3<f64>, EphemerisError>,
{
    let e = earth.position;
    let corrected = light_time_correct(
        &q0,
        &e,
        earth.jd_tt,
        params.light_time_iterations,
        position_at,
    )?;
    let q = corrected.position;
    let p = q - e;
    let geometry = ObjectGeometry::new(&p, &q, &e);

    Ok(GeocentricPlace {
        geometric: Some(geometric),
        light_time: corrected.light_time,
        geometry: Some(geometry),
        true_geocentric_distance: (q0 - e).norm(),
        geocentric_distance: Some(geometry.earth_object),
        magnitude: geometry.magnitude(body.magnitude),
        phase: geometry.illuminated_fraction(),
        equatorial_diameter: geometry.equatorial_diameter(body.semi_diameter),
        p,
        deflector: Some(q),
    })
}

fn star_place(body: &Body, star: &StarCoordinates, earth: &EarthState) -> GeocentricPlace {
    let q = star.heliocentric_at(earth.jd_tt);
    let (p, distance) = match star.distance() {
        Some(_) => {
            let p = q - earth.position;
            (p, Some(p.norm()))
        }
        None => (q, None),
    };

    GeocentricPlace {
        geometric: None,
        light_time: 0.0,
        geometry: None,
        true_geocentric_distance: distance.unwrap_or(f64::INFINITY),
        geocentric_distance: distance,
        magnitude: body.magnitude,
        phase: 1.0,
        equatorial_diameter: 0.0,
        p,
        deflector: Some(q),
    }
}

fn geocentric_place(
    body: &Body,
    earth: &EarthState,
    params: &ReductionParams,
) -> Result<GeocentricPlace, EphemerisError> {
    let jd = earth.jd_tt;
    match &body.kind {
        BodyKind::Sun => Ok(sun_place(body, earth)),
        BodyKind::Luna { .. } => {
            let moon = moon_equatorial_j2000(jd);
            solar_system_place(
                body,
                earth,
                earth.position + moon,
                ecliptic_of_date(&moon, jd),
                params,
                |t| Ok(earth.heliocentric_at(t)? + moon_equatorial_j2000(t)),
            )
        }
        BodyKind::Heliocentric(elements) => {
            let solve = |t: JulianDate| {
                heliocentric_position(
                    elements,
                    t,
                    params.kepler_tolerance,
                    params.kepler_max_iterations,
                )
            };
            let q0 = solve(jd)?.equatorial;
            solar_system_place(
                body,
                earth,
                q0,
                ecliptic_of_date(&q0, jd),
                params,
                |t| solve(t).map(|h| h.equatorial),
            )
        }
        BodyKind::Star(star) => Ok(star_place(body, star, earth)),
    }
}

/// Deflection, aberration, precession and nutation of the geocentric direction.
fn apparent_direction(place: &GeocentricPlace, earth: &EarthState) -> ApparentDirection {
    let jd = earth.jd_tt;

    let u = place.p.normalize();
    let astrometric_j2000 = EquatorialCoordinates::from_vector(&u);
    let astrometric_b1950 =
        EquatorialCoordinates::from_vector(&precess(&u, RefEpoch::J2000, RefEpoch::B1950));

    let deflected = match &place.deflector {
        Some(q) => deflect(&u, q, &earth.position),
        None => u,
    };
    let aberrated = annual_aberration(&deflected.normalize(), &earth.velocity);

    let mean = precess(&aberrated, RefEpoch::J2000, RefEpoch::Date(jd));
    let true_of_date = nutation_matrix(jd) * mean;

    ApparentDirection {
        astrometric_j2000,
        astrometric_b1950,
        deflection: AngularCorrection::between(&u, &deflected),
        aberration: AngularCorrection::between(&deflected, &aberrated),
        nutation: AngularCorrection::between(&mean, &true_of_date),
        apparent: EquatorialCoordinates::from_vector(&true_of_date),
        constellation: constellation_of(&mean, jd),
        ecliptic: apparent_ecliptic(&true_of_date, jd),
    }
}

/// Apparent ecliptic longitude of date of a body (degrees), without the topocentric step.
///
/// This is the quantity sampled by the motion solver.
pub fn apparent_longitude(
    body: &Body,
    earth: &EarthState,
    params: &ReductionParams,
) -> Result<Degree, EphemerisError> {
    let place = geocentric_place(body, earth, params)?;
    Ok(apparent_direction(&place, earth)
        .ecliptic
        .longitude_degrees())
}

/// Reduce one body to its apparent and topocentric place.
///
/// Arguments
/// ---------
/// * `body`: catalog descriptor.
/// * `earth`: Earth state solved at the observer's TT instant.
/// * `observer`: site and instant.
/// * `params`: solver and atmosphere settings.
///
/// Errors
/// ------
/// * [`EphemerisError::KeplerNonConvergence`] from the orbit solver.
/// * [`EphemerisError::InvalidParameter`] when `earth` was not computed at the observer's
///   instant.
pub fn reduce_body(
    body: &Body,
    earth: &EarthState,
    observer: &Observer,
    params: &ReductionParams,
) -> Result<ApparentPosition, EphemerisError> {
    if (earth.jd_tt - observer.time.julian_tt).abs() > EARTH_EPOCH_TOLERANCE {
        return Err(EphemerisError::InvalidParameter(format!(
            "earth state at JD(TT) {} does not match the observer at JD(TT) {}",
            earth.jd_tt, observer.time.julian_tt
        )));
    }

    let jd = earth.jd_tt;
    let place = geocentric_place(body, earth, params)?;
    let direction = apparent_direction(&place, earth);

    let apparent_longitude = direction.ecliptic.longitude_degrees();
    let dms = Sexagesimal::from_degrees(apparent_longitude);
    let topocentric = altaz(
        &direction.apparent,
        place.geocentric_distance,
        observer,
        &params.atmosphere(),
    );

    let moon_phase = match body.kind {
        BodyKind::Luna {
            quarter_approximation,
        } => {
            let sun = ecliptic_of_date(&-earth.position, jd);
            Some(MoonPhase::new(
                apparent_longitude,
                sun.longitude_degrees(),
                place.phase,
                quarter_approximation,
            ))
        }
        _ => None,
    };

    debug!(
        "{} at JD(TT) {jd}: {} lon {apparent_longitude:.6} in {}",
        body.key, direction.apparent, direction.constellation.abbreviation
    );

    Ok(ApparentPosition {
        key: body.key.clone(),
        body_type: body.body_type(),
        jd_tt: jd,
        geometric: place.geometric,
        light_time: place.light_time,
        geometry: place.geometry,
        true_geocentric_distance: place.true_geocentric_distance,
        geocentric_distance: place.geocentric_distance,
        magnitude: place.magnitude,
        phase: place.phase,
        equatorial_diameter: place.equatorial_diameter,
        astrometric_j2000: direction.astrometric_j2000,
        astrometric_b1950: direction.astrometric_b1950,
        deflection: direction.deflection,
        aberration: direction.aberration,
        nutation: direction.nutation,
        apparent: direction.apparent,
        constellation: direction.constellation,
        apparent_ecliptic: direction.ecliptic,
        apparent_longitude,
        apparent_longitude_string: dms.compact(),
        apparent_longitude_30_string: dms.compact_mod30(),
        topocentric,
        moon_phase,
    })
}
