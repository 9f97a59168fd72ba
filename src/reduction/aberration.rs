//! Annual aberration, relativistic form.

use nalgebra::Vector3;

use crate::constants::VLIGHT_AU;

/// Shift the unit direction `p` for the velocity of the Earth (AU/day, equatorial J2000).
///
/// With `V = v/c` and `β⁻¹ = √(1 − V²)`:
///
/// ```text
/// p' = (β⁻¹·p + (1 + p·V / (1 + β⁻¹))·V) / (1 + p·V)
/// ```
///
/// The result is a unit vector when `p` is.
pub fn annual_aberration(p: &Vector3<f64>, earth_velocity: &Vector3<f64>) -> Vector3<f64> {
    let v = earth_velocity / VLIGHT_AU;
    let beta_inv = (1.0 - v.norm_squared()).sqrt();
    let pv = p.dot(&v);

    (beta_inv * p + (1.0 + pv / (1.0 + beta_inv)) * v) / (1.0 + pv)
}
