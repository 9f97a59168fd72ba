//! Correction for the finite speed of light between the body and the Earth.

use nalgebra::Vector3;

use crate::{
    constants::{JulianDate, VLIGHT_AU},
    ephemeris_errors::EphemerisError,
};

/// Heliocentric position of the body at the instant the observed light left it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTimeCorrected {
    pub position: Vector3<f64>,
    /// Light travel time (days)
    pub light_time: f64,
}

/// Iterate the light-time equation `τ = |q(t − τ) − e(t)| / c`.
///
/// Arguments
/// ---------
/// * `q`: heliocentric position of the body at `jd`.
/// * `e`: heliocentric position of the Earth at `jd`.
/// * `iterations`: number of re-evaluations of the body; two are enough for every body of the
///   solar system.
/// * `position_at`: heliocentric position of the body at an earlier instant.
pub fn light_time_correct<F>(
    q: &Vector3<f64>,
    e: &Vector3<f64>,
    jd: JulianDate,
    iterations: usize,
    mut position_at: F,
) -> Result<LightTimeCorrected, EphemerisError>
where
    F: FnMut(JulianDate) -> Result<Vector3<f64>, EphemerisError>,
{
    let mut position = *q;
    let mut light_time = 0.0;

    for _ in 0..iterations {
        light_time = (position - e).norm() / VLIGHT_AU;
        position = position_at(jd - light_time)?;
    }

    Ok(LightTimeCorrected {
        position,
        light_time,
    })
}
