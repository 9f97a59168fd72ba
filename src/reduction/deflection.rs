//! Gravitational deflection of light by the Sun.

use nalgebra::Vector3;

use crate::constants::SOLAR_DEFLECTION;

/// Deflect the unit geocentric direction `p` of a body by the Sun's field.
///
/// Arguments
/// ---------
/// * `p`: unit vector from the Earth to the body.
/// * `q`: heliocentric vector of the body (any length, only its direction is used).
/// * `e`: heliocentric vector of the Earth.
///
/// Returns the deflected direction, `p + C·(pq·ê − ep·q̂)` with
/// `C = 1.974e-8 / (SE·(1 + qe))`. The result is not renormalised; the correction is of
/// order 1e-8.
pub fn deflect(p: &Vector3<f64>, q: &Vector3<f64>, e: &Vector3<f64>) -> Vector3<f64> {
    let sun_earth = e.norm();
    let e_hat = e / sun_earth;
    let q_hat = q.normalize();

    let pq = p.dot(&q_hat);
    let ep = e_hat.dot(p);
    let qe = q_hat.dot(&e_hat);

    let c = SOLAR_DEFLECTION / (sun_earth * (1.0 + qe));
    p + c * (pq * e_hat - ep * q_hat)
}

#[cfg(test)]
mod deflection_test {
    use super::*;
    use crate::constants::RADSEC;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_deflection_at_the_solar_limb() {
        // A star grazing the limb: 0.267° from the Sun, far behind it.
        let e = Vector3::new(-1.0, 0.0, 0.0);
        let theta = 0.2666_f64.to_radians();
        let p = Vector3::new(theta.cos(), theta.sin(), 0.0);
        let q = p * 1e9 - e;
        let deflected = deflect(&p, &q, &e);

        let shift = (deflected.normalize() - p).norm() / RADSEC;
        assert_abs_diff_eq!(shift, 1.75, epsilon = 0.02);
        // Light is bent away from the Sun.
        assert!(deflected.normalize().y > p.y);
    }

    #[test]
    fn test_opposite_the_sun() {
        let e = Vector3::new(1.0, 0.0, 0.0);
        let p = Vector3::new(1.0, 0.0, 0.0);
        let q = Vector3::new(5.0, 0.0, 0.0);
        assert_abs_diff_eq!(deflect(&p, &q, &e), p, epsilon = 1e-18);
    }
}
