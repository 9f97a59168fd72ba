//! Sun–object–Earth triangle, and the photometry derived from it.

use nalgebra::Vector3;
use serde::Serialize;

use crate::constants::{ArcSec, AstronomicalUnit, Degree, RADEG};

/// Sides and angle cosines of the Sun–object–Earth triangle.
///
/// `pq`, `qe` and `ep` are the cosines between the geocentric vector `p`, the heliocentric
/// body vector `q` and the heliocentric Earth vector `e`; `pq` is the cosine of the phase
/// angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObjectGeometry {
    /// Earth–object distance
    pub earth_object: AstronomicalUnit,
    /// Sun–object distance
    pub sun_object: AstronomicalUnit,
    /// Sun–Earth distance
    pub sun_earth: AstronomicalUnit,
    pub pq: f64,
    pub qe: f64,
    pub ep: f64,
    /// Angular distance of the object from the Sun, seen from the Earth
    pub elongation: Degree,
    /// Sun–object–Earth angle
    pub phase_angle: Degree,
}

impl ObjectGeometry {
    pub fn new(p: &Vector3<f64>, q: &Vector3<f64>, e: &Vector3<f64>) -> Self {
        let earth_object = p.norm();
        let sun_object = q.norm();
        let sun_earth = e.norm();

        let pq = p.dot(q) / (earth_object * sun_object);
        let qe = q.dot(e) / (sun_object * sun_earth);
        let ep = e.dot(p) / (sun_earth * earth_object);

        ObjectGeometry {
            earth_object,
            sun_object,
            sun_earth,
            pq,
            qe,
            ep,
            elongation: (-ep).clamp(-1.0, 1.0).acos() / RADEG,
            phase_angle: pq.clamp(-1.0, 1.0).acos() / RADEG,
        }
    }

    /// Approximate visual magnitude
    /// `V(1,0) + 2.1715·ln(EO·SO) − 1.085·ln(0.5·(1.01 + 0.99·pq))`.
    ///
    /// The phase term is a crude fit and is known to be poor for inferior planets near
    /// inferior conjunction.
    pub fn magnitude(&self, v10: f64) -> f64 {
        v10 + 2.1715 * (self.earth_object * self.sun_object).ln()
            - 1.085 * (0.5 * (1.01 + 0.99 * self.pq)).ln()
    }

    /// Illuminated fraction of the disc.
    pub fn illuminated_fraction(&self) -> f64 {
        0.5 * (1.0 + self.pq)
    }

    /// Apparent equatorial diameter from the semi-diameter at 1 AU.
    pub fn equatorial_diameter(&self, semi_diameter: ArcSec) -> ArcSec {
        2.0 * semi_diameter / self.earth_object
    }
}

/// Magnitude of the Sun at distance `sun_earth`.
pub fn sun_magnitude(v10: f64, sun_earth: AstronomicalUnit) -> f64 {
    v10 + 5.0 * sun_earth.log10()
}
