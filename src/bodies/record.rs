use serde::{Deserialize, Serialize};

use crate::{
    bodies::{
        orbital_elements::OrbitalElements, star::StarCoordinates, Body, BodyKind, BodyType,
    },
    constants::{ArcSec, Degree},
    ephemeris_errors::EphemerisError,
};

/// Serialized catalog entry.
///
/// The `type` string selects which of `elements` / `star` must be present:
///
/// ```json
/// { "key": "ceres", "type": "heliocentric", "magnitude": 3.34, "semi_diameter": 0.33,
///   "elements": { "epoch": 2451545.0, "inclination": 10.58, "ascending_node": 80.39,
///                 "argument_of_perihelion": 73.6, "semi_axis": 2.767, "eccentricity": 0.0785,
///                 "mean_anomaly": 6.07 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub body_type: String,
    #[serde(default)]
    pub magnitude: f64,
    #[serde(default)]
    pub semi_diameter: ArcSec,
    #[serde(default)]
    pub quarter_approximation: Option<Degree>,
    #[serde(default)]
    pub elements: Option<OrbitalElements>,
    #[serde(default)]
    pub star: Option<StarCoordinates>,
}

impl TryFrom<BodyRecord> for Body {
    type Error = EphemerisError;

    fn try_from(record: BodyRecord) -> Result<Self, Self::Error> {
        let body_type: BodyType =
            record
                .body_type
                .parse()
                .map_err(|_| EphemerisError::UnknownBody {
                    key: record.key.clone(),
                    kind: record.body_type.clone(),
                })?;

        let missing = |what: &str| {
            EphemerisError::InvalidBodyRecord(format!(
                "body \"{}\" of type {} has no {what}",
                record.key, body_type
            ))
        };

        let kind = match body_type {
            BodyType::Sun => BodyKind::Sun,
            BodyType::Luna => BodyKind::Luna {
                quarter_approximation: record.quarter_approximation.unwrap_or(1.0),
            },
            BodyType::Heliocentric => {
                let elements = record.elements.clone().ok_or_else(|| missing("elements"))?;
                if !(0.0..1.0).contains(&elements.eccentricity) {
                    return Err(EphemerisError::InvalidBodyRecord(format!(
                        "body \"{}\" is not on an elliptic orbit (e = {})",
                        record.key, elements.eccentricity
                    )));
                }
                elements.semi_major_axis()?;
                BodyKind::Heliocentric(elements)
            }
            BodyType::Star => BodyKind::Star(record.star.ok_or_else(|| missing("star"))?),
        };

        Ok(Body {
            name: record.name.unwrap_or_else(|| record.key.clone()),
            key: record.key,
            magnitude: record.magnitude,
            semi_diameter: record.semi_diameter,
            kind,
        })
    }
}
