//! # Celestial bodies
//!
//! A [`Body`] is the immutable descriptor the reducer works from: a stable key, a display
//! name, photometric constants and a closed [`BodyKind`] selecting the reduction variant.
//!
//! ## Submodules
//!
//! - [`orbital_elements`]: heliocentric elliptic elements with optional secular rates.
//! - [`star`]: catalog coordinates of fixed stars.
//! - [`catalog`]: the keyed table of bodies, with a built-in default.
//! - [`record`]: serde form of a catalog entry, for externally supplied bodies.

pub mod catalog;
pub mod orbital_elements;
pub mod record;
pub mod star;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{
    bodies::{orbital_elements::OrbitalElements, star::StarCoordinates},
    constants::{ArcSec, Degree},
    ephemeris_errors::EphemerisError,
};

/// Reduction variant of a body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    /// Geocentric position is the opposite of the Earth's heliocentric position.
    Sun,
    /// Moon from the lunar series. `quarter_approximation` is the half-width, in degrees of
    /// elongation, of the window in which a principal phase is reported.
    Luna { quarter_approximation: Degree },
    Heliocentric(OrbitalElements),
    Star(StarCoordinates),
}

/// Tag of a [`BodyKind`], as written in catalog records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Sun,
    Luna,
    Heliocentric,
    Star,
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Sun => "sun",
            BodyType::Luna => "luna",
            BodyType::Heliocentric => "heliocentric",
            BodyType::Star => "star",
        }
    }
}

impl FromStr for BodyType {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sun" => Ok(BodyType::Sun),
            "luna" => Ok(BodyType::Luna),
            "heliocentric" => Ok(BodyType::Heliocentric),
            "star" => Ok(BodyType::Star),
            other => Err(EphemerisError::UnknownBodyType(other.to_string())),
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub key: String,
    pub name: String,
    /// Magnitude coefficient V(1,0)
    pub magnitude: f64,
    /// Semi-diameter seen from 1 AU
    pub semi_diameter: ArcSec,
    pub kind: BodyKind,
}

impl Body {
    pub fn sun(magnitude: f64, semi_diameter: ArcSec) -> Self {
        Body {
            key: "sun".into(),
            name: "Sun".into(),
            magnitude,
            semi_diameter,
            kind: BodyKind::Sun,
        }
    }

    pub fn moon(magnitude: f64, semi_diameter: ArcSec, quarter_approximation: Degree) -> Self {
        Body {
            key: "moon".into(),
            name: "Moon".into(),
            magnitude,
            semi_diameter,
            kind: BodyKind::Luna {
                quarter_approximation,
            },
        }
    }

    pub fn heliocentric(
        key: &str,
        name: &str,
        magnitude: f64,
        semi_diameter: ArcSec,
        elements: OrbitalElements,
    ) -> Self {
        Body {
            key: key.into(),
            name: name.into(),
            magnitude,
            semi_diameter,
            kind: BodyKind::Heliocentric(elements),
        }
    }

    pub fn star(key: &str, name: &str, magnitude: f64, coordinates: StarCoordinates) -> Self {
        Body {
            key: key.into(),
            name: name.into(),
            magnitude,
            semi_diameter: 0.0,
            kind: BodyKind::Star(coordinates),
        }
    }

    pub fn body_type(&self) -> BodyType {
        match self.kind {
            BodyKind::Sun => BodyType::Sun,
            BodyKind::Luna { .. } => BodyType::Luna,
            BodyKind::Heliocentric(_) => BodyType::Heliocentric,
            BodyKind::Star(_) => BodyType::Star,
        }
    }

    /// Elements of a heliocentric body, `None` for every other kind.
    pub fn orbital_elements(&self) -> Option<&OrbitalElements> {
        match &self.kind {
            BodyKind::Heliocentric(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self.kind, BodyKind::Star(_))
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.key, self.body_type())
    }
}
