//! # Body catalog
//!
//! Keyed, ordered table of [`Body`] descriptors. The catalog is plain read-only data handed to
//! the reducer and the motion solver; nothing in the crate holds a global instance.
//!
//! [`BodyCatalog::builtin`] provides the Sun, the Moon, the planets (with the Earth–Moon
//! barycentre under the key `"earth"`) and a handful of bright stars. Planetary elements are
//! the J2000 mean elements with their linear rates per century (Standish, *Keplerian Elements
//! for Approximate Positions of the Major Planets*, table 1, valid 1800–2050).

use std::fmt;

use itertools::Itertools;

use crate::{
    bodies::{
        orbital_elements::{OrbitalElements, SecularRates},
        record::BodyRecord,
        star::StarCoordinates,
        Body,
    },
    ephemeris_errors::EphemerisError,
};

/// Key of the body whose elements give the Earth–Moon barycentre.
pub const EARTH_KEY: &str = "earth";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyCatalog {
    bodies: Vec<Body>,
}

/// Row of the planetary element table:
/// key, name, a, e, I, L, ϖ, Ω, then the rates of the same six, then V(1,0) and semi-diameter.
type PlanetRow = (
    &'static str,
    &'static str,
    [f64; 6],
    [f64; 6],
    f64,
    f64,
);

#[rustfmt::skip]
const PLANETS: [PlanetRow; 9] = [
    ("mercury", "Mercury",
        [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
        [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
        -0.42, 3.36),
    ("venus", "Venus",
        [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
        [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
        -4.40, 8.41),
    ("earth", "Earth",
        [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
        [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
        0.0, 0.0),
    ("mars", "Mars",
        [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
        [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
        -1.52, 4.68),
    ("jupiter", "Jupiter",
        [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909],
        [-0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
        -9.40, 98.44),
    ("saturn", "Saturn",
        [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448],
        [-0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
        -8.88, 82.73),
    ("uranus", "Uranus",
        [19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.95427630, 74.01692503],
        [-0.00196176, -0.00004397, -0.00242939, 428.48202785, 0.40805281, 0.04240589],
        -7.19, 35.02),
    ("neptune", "Neptune",
        [30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574],
        [0.00026291, 0.00005105, 0.00035372, 218.45945325, -0.32241464, -0.00508664],
        -6.87, 33.50),
    ("pluto", "Pluto",
        [39.48211675, 0.24882730, 17.14001206, 238.92903833, 224.06891629, 110.30393684],
        [-0.00031596, 0.00005170, 0.00004818, 145.20780515, -0.04062942, -0.01183482],
        -1.0, 2.07),
];

/// key, name, RA, Dec (deg), μα·cos δ, μδ (mas/yr), parallax (mas), V
#[rustfmt::skip]
const STARS: [(&str, &str, f64, f64, f64, f64, f64, f64); 8] = [
    ("sirius", "Sirius", 101.287155, -16.716116, -546.01, -1223.07, 379.21, -1.46),
    ("polaris", "Polaris", 37.954561, 89.264109, 44.48, -11.85, 7.54, 1.98),
    ("vega", "Vega", 279.234735, 38.783689, 200.94, 286.23, 130.23, 0.03),
    ("betelgeuse", "Betelgeuse", 88.792939, 7.407064, 27.54, 11.30, 6.55, 0.42),
    ("regulus", "Regulus", 152.092962, 11.967209, -248.73, 5.59, 41.13, 1.40),
    ("spica", "Spica", 201.298247, -11.161319, -42.35, -30.67, 13.06, 0.97),
    ("antares", "Antares", 247.351915, -26.432003, -12.11, -23.30, 5.89, 1.06),
    ("aldebaran", "Aldebaran", 68.980163, 16.509302, 63.45, -188.94, 48.94, 0.86),
];

impl BodyCatalog {
    pub fn new(bodies: Vec<Body>) -> Self {
        BodyCatalog { bodies }
    }

    /// The default catalog: Sun, Moon, planets, Earth and bright stars.
    pub fn builtin() -> Self {
        let mut bodies = vec![Body::sun(-26.74, 959.63), Body::moon(0.21, 2.3955, 1.0)];

        bodies.extend(PLANETS.iter().map(|&(key, name, el, rate, mag, sd)| {
            let elements = OrbitalElements::from_mean_longitudes(
                el[0],
                el[1],
                el[2],
                el[3],
                el[4],
                el[5],
                rate[3],
                SecularRates {
                    semi_axis: rate[0],
                    eccentricity: rate[1],
                    inclination: rate[2],
                    perihelion_longitude: rate[4],
                    ascending_node: rate[5],
                },
            );
            Body::heliocentric(key, name, mag, sd, elements)
        }));

        bodies.extend(
            STARS
                .iter()
                .map(|&(key, name, ra, dec, pm_ra, pm_dec, parallax, mag)| {
                    let coordinates = StarCoordinates::new(ra, dec)
                        .with_proper_motion(pm_ra, pm_dec)
                        .with_parallax(parallax);
                    Body::star(key, name, mag, coordinates)
                }),
        );

        BodyCatalog { bodies }
    }

    /// Build a catalog from deserialized records, rejecting duplicate keys.
    pub fn from_records(
        records: impl IntoIterator<Item = BodyRecord>,
    ) -> Result<Self, EphemerisError> {
        let mut catalog = BodyCatalog::default();
        for record in records {
            catalog.insert(Body::try_from(record)?)?;
        }
        Ok(catalog)
    }

    /// Add a body. A key already present is an [`EphemerisError::InvalidBodyRecord`].
    pub fn insert(&mut self, body: Body) -> Result<(), EphemerisError> {
        if self.contains(&body.key) {
            return Err(EphemerisError::InvalidBodyRecord(format!(
                "duplicate body key \"{}\"",
                body.key
            )));
        }
        self.bodies.push(body);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bodies.iter().any(|b| b.key == key)
    }

    /// Look a body up by key.
    ///
    /// Errors
    /// ------
    /// * [`EphemerisError::UnknownBody`] when no body carries `key`.
    pub fn get(&self, key: &str) -> Result<&Body, EphemerisError> {
        self.bodies
            .iter()
            .find(|b| b.key == key)
            .ok_or_else(|| EphemerisError::UnknownBody {
                key: key.to_string(),
                kind: "unknown".to_string(),
            })
    }

    /// Elements of the Earth–Moon barycentre.
    pub fn earth_elements(&self) -> Result<&OrbitalElements, EphemerisError> {
        let earth = self.get(EARTH_KEY)?;
        earth
            .orbital_elements()
            .ok_or_else(|| EphemerisError::UnknownBody {
                key: EARTH_KEY.to_string(),
                kind: earth.body_type().to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl fmt::Display for BodyCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BodyCatalog[{}]: {}",
            self.bodies.len(),
            self.bodies
                .iter()
                .map(|b| format!("{}:{}", b.key, b.body_type()))
                .join(", ")
        )
    }
}
