//! Constellation containing a direction.

use std::fmt;

use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    angles::EquatorialCoordinates,
    constants::JulianDate,
    reduction::constellation_data::{BOUNDARIES, NAMES},
    ref_system::{precess, RefEpoch},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Constellation {
    pub abbreviation: &'static str,
    pub name: &'static str,
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.abbreviation)
    }
}

/// Constellation of a B1875 position, right ascension in hours and declination in degrees.
pub fn constellation_b1875(ra_hours: f64, dec_degrees: f64) -> Constellation {
    let abbreviation = BOUNDARIES
        .iter()
        .find(|&&(ra_low, ra_high, dec_low, _)| {
            dec_degrees >= dec_low && ra_low <= ra_hours && ra_hours < ra_high
        })
        .map_or("Oct", |&(_, _, _, abbr)| abbr);

    let name = NAMES
        .iter()
        .find(|(abbr, _)| *abbr == abbreviation)
        .map_or(abbreviation, |&(_, name)| name);

    Constellation { abbreviation, name }
}

/// Constellation of an equatorial direction referred to the mean equinox of `jd`.
pub fn constellation_of(direction: &Vector3<f64>, jd: JulianDate) -> Constellation {
    let b1875 = precess(direction, RefEpoch::Date(jd), RefEpoch::B1875);
    let eq = EquatorialCoordinates::from_vector(&b1875);
    constellation_b1875(eq.ra_hours(), eq.dec_degrees())
}

#[cfg(test)]
mod constellation_test {
    use super::*;
    use crate::angles::polar_to_rect;
    use crate::constants::{J2000, RADEG};
    use itertools::Itertools;

    fn j2000(ra_deg: f64, dec_deg: f64) -> Constellation {
        constellation_of(&polar_to_rect(ra_deg * RADEG, dec_deg * RADEG, 1.0), J2000)
    }

    #[test]
    fn test_bright_stars() {
        assert_eq!(j2000(101.287155, -16.716116).abbreviation, "CMa");
        assert_eq!(j2000(279.234735, 38.783689).abbreviation, "Lyr");
        assert_eq!(j2000(88.792939, 7.407064).abbreviation, "Ori");
        assert_eq!(j2000(37.954561, 89.264109).abbreviation, "UMi");
        assert_eq!(j2000(152.092962, 11.967209).abbreviation, "Leo");
        assert_eq!(j2000(201.298247, -11.161319).abbreviation, "Vir");
        assert_eq!(j2000(247.351915, -26.432003).abbreviation, "Sco");
        assert_eq!(j2000(68.980163, 16.509302).abbreviation, "Tau");
    }

    #[test]
    fn test_poles_and_names() {
        assert_eq!(constellation_b1875(3.0, -89.9).name, "Octans");
        assert_eq!(constellation_b1875(12.0, 89.9).to_string(), "Ursa Minor (UMi)");
    }

    #[test]
    fn test_tables_are_consistent() {
        assert!(BOUNDARIES
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.2 >= b.2));
        assert!(BOUNDARIES
            .iter()
            .all(|(_, _, _, abbr)| NAMES.iter().any(|(n, _)| n == abbr)));
        assert_eq!(NAMES.iter().map(|(abbr, _)| abbr).unique().count(), 88);
    }
}
