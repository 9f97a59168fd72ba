use log::trace;
use nalgebra::Vector3;

use crate::{
    angles::{principal_angle, EclipticCoordinates},
    bodies::orbital_elements::OrbitalElements,
    constants::{AstronomicalUnit, JulianDate, Radian, J2000},
    earth_orientation::obleq,
    ephemeris_errors::EphemerisError,
    ref_system::{ecliptic_to_equatorial, equatorial_to_ecliptic, precess, RefEpoch},
};

/// Position of a body on its heliocentric ellipse at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct HeliocentricPosition {
    /// Instant of the position (JD, TT)
    pub jd_tt: JulianDate,
    /// Equatorial rectangular coordinates, mean equator and equinox J2000 (AU)
    pub equatorial: Vector3<f64>,
    /// Ecliptic rectangular coordinates, mean ecliptic and equinox J2000 (AU)
    pub ecliptic: Vector3<f64>,
    pub radius: AstronomicalUnit,
    pub longitude: Radian,
    pub latitude: Radian,
    pub eccentric_anomaly: Radian,
    pub true_anomaly: Radian,
}

/// Solve Kepler's equation `M = E − e·sin E` for the eccentric anomaly.
///
/// Newton iteration from `E₀ = M`, with each step bounded to one radian so that very
/// eccentric orbits cannot overshoot. Orbits with `e > 0.9` get four times the iteration
/// budget.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly in radians (any range).
/// * `eccentricity`: must lie in [0, 1).
/// * `tolerance`: absolute tolerance on the last Newton correction (radians).
/// * `max_iterations`: iteration cap before reporting non-convergence.
///
/// Errors
/// ------
/// * [`EphemerisError::KeplerNonConvergence`] when `e ∉ [0, 1)` or the cap is reached.
pub fn solve_kepler_equation(
    mean_anomaly: Radian,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Radian, EphemerisError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(EphemerisError::KeplerNonConvergence {
            eccentricity,
            mean_anomaly,
            iterations: 0,
        });
    }

    let m = principal_angle(mean_anomaly);
    let cap = if eccentricity > 0.9 {
        4 * max_iterations
    } else {
        max_iterations
    };

    let mut e_anom = m;
    for iteration in 1..=cap {
        let f = e_anom - eccentricity * e_anom.sin() - m;
        let fp = 1.0 - eccentricity * e_anom.cos();
        let delta = (f / fp).clamp(-1.0, 1.0);
        e_anom -= delta;
        if delta.abs() < tolerance {
            trace!("kepler: e = {eccentricity}, M = {m}, converged in {iteration} iterations");
            return Ok(e_anom);
        }
    }

    Err(EphemerisError::KeplerNonConvergence {
        eccentricity,
        mean_anomaly,
        iterations: cap,
    })
}

/// True anomaly from the eccentric anomaly.
pub fn true_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = 0.5 * eccentric_anomaly;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// Heliocentric position of a body from its elliptic elements.
///
/// The elements are evaluated at `jd_tt`, Kepler's equation is solved, and the position on
/// the orbit is rotated through ω, i and Ω into ecliptic coordinates. Elements referred to
/// an equinox other than J2000 are precessed to J2000 before the final rotation to the
/// equator by the J2000 obliquity.
pub fn heliocentric_position(
    elements: &OrbitalElements,
    jd_tt: JulianDate,
    tolerance: f64,
    max_iterations: usize,
) -> Result<HeliocentricPosition, EphemerisError> {
    let el = elements.at(jd_tt)?;
    let ecc = el.eccentricity;

    let e_anom = solve_kepler_equation(el.mean_anomaly, ecc, tolerance, max_iterations)?;
    let nu = true_anomaly(e_anom, ecc);
    let r = el.semi_axis * (1.0 - ecc * e_anom.cos());

    // Argument of latitude
    let (sin_u, cos_u) = (nu + el.argument_of_perihelion).sin_cos();
    let (sin_node, cos_node) = el.ascending_node.sin_cos();
    let (sin_i, cos_i) = el.inclination.sin_cos();

    let mut ecliptic = Vector3::new(
        r * (cos_u * cos_node - sin_u * sin_node * cos_i),
        r * (cos_u * sin_node + sin_u * cos_node * cos_i),
        r * sin_u * sin_i,
    );

    if elements.equinox != J2000 {
        let of_equinox = ecliptic_to_equatorial(&ecliptic, obleq(elements.equinox));
        let j2000 = precess(&of_equinox, RefEpoch::Date(elements.equinox), RefEpoch::J2000);
        ecliptic = equatorial_to_ecliptic(&j2000, obleq(J2000));
    }

    let equatorial = ecliptic_to_equatorial(&ecliptic, obleq(J2000));
    let polar = EclipticCoordinates::from_vector(&ecliptic);

    Ok(HeliocentricPosition {
        jd_tt,
        equatorial,
        ecliptic,
        radius: r,
        longitude: polar.longitude,
        latitude: polar.latitude,
        eccentric_anomaly: e_anom,
        true_anomaly: nu,
    })
}
